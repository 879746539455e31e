//! Diesel schema for schedule persistence.

diesel::table! {
    /// Funder reference records keyed by their natural identifier.
    funders (bernie_number) {
        /// Funder natural key, e.g. `BN0002E1`.
        #[max_length = 8]
        bernie_number -> Varchar,
        /// Preferred display name.
        canonical_name -> Varchar,
        /// Known name variants as a JSON array of strings.
        aliases -> Jsonb,
        /// Employer identification number, when known.
        #[max_length = 9]
        ein -> Nullable<Varchar>,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Raw status texts, unique per (text, source system) pair.
    raw_statuses (id) {
        /// Surrogate identifier.
        id -> Int4,
        /// Status text exactly as the source spelled it.
        status_text -> Varchar,
        /// Source-system tag.
        #[max_length = 50]
        source_system -> Varchar,
    }
}

diesel::table! {
    /// Development team members, unique per full name.
    dev_team_members (id) {
        /// Surrogate identifier.
        id -> Int4,
        /// Full name as the source spelled it.
        full_name -> Varchar,
        /// Contact email, when known.
        email -> Nullable<Varchar>,
        /// Role within the team, when known.
        role -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Core scheduling row shared by every task variant.
    scheduled_tasks (task_id) {
        /// External task identifier.
        task_id -> Varchar,
        /// Variant discriminator selecting the satellite table.
        #[max_length = 20]
        kind -> Varchar,
        /// Raw type tag as the source spelled it.
        task_type -> Varchar,
        /// Foreign key to the funder.
        #[max_length = 8]
        bernie_number -> Varchar,
        /// Foreign key to the raw status row.
        status_id -> Int4,
        /// Foreign key to the owning team member, when assigned.
        owner_id -> Nullable<Int4>,
        /// When the task is due.
        deadline -> Timestamptz,
        /// Whether the deadline was substituted during ingestion.
        deadline_defaulted -> Bool,
        /// Last modification timestamp from the source.
        last_modified_in_source -> Timestamptz,
        /// Fiscal year tag.
        fiscal_year -> Nullable<Varchar>,
        /// Program area.
        program_area -> Nullable<Varchar>,
        /// Initiative name.
        initiative -> Nullable<Varchar>,
        /// Link to an opportunity record.
        opportunity_id -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Letter-of-intent satellite data.
    lois (task_id) {
        /// External task identifier, shared with the core row.
        task_id -> Varchar,
        /// Classified workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// When a decision is expected or was received.
        notification_date -> Nullable<Date>,
        /// Tentative requested amount, stored as exact decimal text.
        amount_requested -> Nullable<Varchar>,
        /// Task id of the follow-on proposal.
        related_proposal_id -> Nullable<Varchar>,
        /// Internal development notes.
        dev_team_notes -> Nullable<Text>,
    }
}

diesel::table! {
    /// Proposal satellite data.
    proposals (task_id) {
        /// External task identifier, shared with the core row.
        task_id -> Varchar,
        /// Classified workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Requested amount, stored as exact decimal text.
        amount_requested -> Varchar,
        /// Awarded amount, stored as exact decimal text.
        award_amount -> Nullable<Varchar>,
        /// When the application was submitted.
        submission_date -> Nullable<Date>,
        /// When the funding decision was received.
        notification_date -> Nullable<Date>,
        /// Grant period start.
        grant_start_date -> Nullable<Date>,
        /// Grant period end.
        grant_end_date -> Nullable<Date>,
        /// Communities served.
        communities -> Nullable<Text>,
        /// Team members supported by the funding.
        members_funded -> Nullable<Text>,
        /// Business model or approach funded.
        model_funded -> Nullable<Text>,
        /// Internal development notes.
        dev_team_notes -> Nullable<Text>,
        /// Goals for the grant.
        grant_goals -> Nullable<Text>,
    }
}

diesel::table! {
    /// Report satellite data.
    reports (task_id) {
        /// External task identifier, shared with the core row.
        task_id -> Varchar,
        /// Classified workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Source type tag preserved verbatim.
        report_type -> Varchar,
        /// Task id of the proposal being reported on.
        related_proposal_id -> Nullable<Varchar>,
        /// When the report was submitted.
        submission_date -> Nullable<Date>,
        /// Reporting period start.
        reporting_period_start -> Nullable<Date>,
        /// Reporting period end.
        reporting_period_end -> Nullable<Date>,
        /// Acknowledgment requirements.
        acknowledgment_needs -> Nullable<Text>,
        /// Internal development notes.
        dev_team_notes -> Nullable<Text>,
    }
}

diesel::table! {
    /// Reminder satellite data.
    reminders (task_id) {
        /// External task identifier, shared with the core row.
        task_id -> Varchar,
        /// What this reminder is about.
        reminder_note -> Nullable<Text>,
    }
}
