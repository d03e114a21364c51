pub mod format;
pub mod tone;
pub mod view;

pub use format::{
    EMPTY_STATE, format_alert, format_analysis_detail, format_modal, format_projects_table,
    format_ticket_detail, format_ticket_row, format_ticket_table, format_timestamp,
    render_dashboard,
};
pub use tone::{Confidence, Tone, confidence_percent, priority_tone, status_tone};
pub use view::{AnalysisDetail, DashboardView, Screen, TicketRow, compute_dashboard_view};
