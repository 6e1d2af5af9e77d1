use crate::models::notification::NotificationKind;
use crate::notify::Decision;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// Picks the invitation or regret template by decision kind and fills it in.
pub fn render(decision: &Decision) -> RenderedMessage {
    let Decision {
        candidate_name,
        job_title,
        company_name,
        hr_name,
        kind,
        ..
    } = decision;

    match kind {
        NotificationKind::Interview => RenderedMessage {
            subject: format!("Interview Invitation – {job_title}"),
            body: format!(
                "Dear {candidate_name},\n\n\
                 We are pleased to invite you for an interview for the {job_title} position at {company_name}.\n\
                 Our HR team will contact you shortly with the next steps.\n\n\
                 Regards,\n\
                 {hr_name}\n\
                 {company_name}"
            ),
        },
        NotificationKind::Rejection => RenderedMessage {
            subject: format!("Application Update – {job_title}"),
            body: format!(
                "Dear {candidate_name},\n\n\
                 Thank you for applying for the {job_title} position at {company_name}.\n\
                 After careful consideration, we regret to inform you that you were not selected.\n\n\
                 We wish you all the best.\n\n\
                 Regards,\n\
                 {hr_name}\n\
                 {company_name}"
            ),
        },
    }
}
