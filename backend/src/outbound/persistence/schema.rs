//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Logged PR attempts, append-only.
    personal_records (id) {
        /// Primary key.
        id -> Int8,
        /// Internal user identifier.
        user_id -> Text,
        /// Display name captured with the attempt.
        username -> Text,
        /// Canonical exercise name.
        exercise -> Text,
        /// Lifted load; zero marks a bodyweight attempt.
        weight -> Float8,
        /// Repetitions performed.
        reps -> Int4,
        /// Derived Epley estimate used for ranking.
        estimated_one_rep_max -> Float8,
        /// When the attempt was logged.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered exercise slots making up per-letter workout plans.
    workout_exercises (id) {
        /// Primary key.
        id -> Int4,
        /// Internal user identifier.
        user_id -> Text,
        /// Workout letter (A, B, C, ...).
        workout_letter -> Text,
        /// Position within the plan, starting at 1.
        exercise_order -> Int4,
        /// Exercise name as shown to the member.
        exercise_name -> Text,
        /// Free-text setup notes.
        setup_notes -> Nullable<Text>,
        /// Non-standard logging treatment, if any.
        special_logging -> Nullable<Text>,
    }
}

diesel::table! {
    /// Per-letter completion counters driving the deload rule.
    ///
    /// UNIQUE (user_id, workout_letter).
    workout_completions (id) {
        /// Primary key.
        id -> Int4,
        /// Internal user identifier.
        user_id -> Text,
        /// Workout letter.
        workout_letter -> Text,
        /// Completions since the last reset.
        completion_count -> Int4,
        /// Most recent completion, if any.
        last_completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// One-row-per-day core-food check-ins.
    ///
    /// UNIQUE (user_id, checkin_date).
    core_food_checkins (id) {
        /// Primary key.
        id -> Int4,
        /// Internal user identifier.
        user_id -> Text,
        /// The day being checked in.
        checkin_date -> Date,
        /// Whether the day's core foods were completed.
        completed -> Bool,
        /// When the check-in was recorded.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Weekly training-log submissions.
    weekly_logs (id) {
        /// Primary key.
        id -> Int4,
        /// Internal user identifier.
        user_id -> Text,
        /// When the log was submitted.
        recorded_at -> Timestamptz,
        /// XP granted for the submission.
        xp_awarded -> Int4,
    }
}

diesel::table! {
    /// Per-user XP totals. Level is derived, never stored.
    xp_accounts (user_id) {
        /// Internal user identifier (primary key).
        user_id -> Text,
        /// Display name captured at award time.
        username -> Text,
        /// Lifetime XP total.
        total_xp -> Int8,
        /// Timestamp of the most recent award.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Dashboard members and their unique access codes.
    ///
    /// UNIQUE (access_code).
    dashboard_members (user_id) {
        /// Internal user identifier (primary key).
        user_id -> Text,
        /// Display name.
        username -> Text,
        /// Unique opaque access code.
        access_code -> Text,
        /// When the member was enrolled.
        created_at -> Timestamptz,
    }
}
