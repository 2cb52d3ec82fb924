use anyhow::{bail, Result};
use csm_portfolio::ClientRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTemplate {
    /// Onboarding welcome.
    Welcome,
    /// Follow-up after a meeting.
    FollowUp,
    /// Overdue invoice reminder.
    PaymentReminder,
}

impl EmailTemplate {
    pub const ALL: [EmailTemplate; 3] = [
        EmailTemplate::Welcome,
        EmailTemplate::FollowUp,
        EmailTemplate::PaymentReminder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailTemplate::Welcome => "welcome",
            EmailTemplate::FollowUp => "follow_up",
            EmailTemplate::PaymentReminder => "payment_reminder",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmailTemplate::Welcome => "Welcome letter (onboarding)",
            EmailTemplate::FollowUp => "Follow-up after a meeting",
            EmailTemplate::PaymentReminder => "Payment reminder",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "welcome" => Ok(EmailTemplate::Welcome),
            "follow_up" | "followup" => Ok(EmailTemplate::FollowUp),
            "payment_reminder" | "payment" => Ok(EmailTemplate::PaymentReminder),
            other => bail!(
                "invalid email template '{}'. expected one of: welcome | follow_up | payment_reminder",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Render `template` for `client`, signed by `operator_name`.
pub fn draft_email(template: EmailTemplate, client: &ClientRecord, operator_name: &str) -> EmailDraft {
    let greeting_name = if client.contact.name.trim().is_empty() {
        client.name.as_str()
    } else {
        client.contact.name.as_str()
    };

    let (subject, paragraph) = match template {
        EmailTemplate::Welcome => (
            format!("Welcome aboard, {}", client.name),
            "Thank you for choosing us. I will be your customer success manager and will \
             help your team get the most out of the platform. Let's schedule a kickoff \
             call this week to agree on goals and the onboarding plan."
                .to_string(),
        ),
        EmailTemplate::FollowUp => (
            format!("Follow-up: {}", non_empty(&client.last_interaction, "our meeting")),
            format!(
                "Thank you for your time. As agreed, the next step is: {}{}. \
                 Please let me know if anything changes on your side.",
                non_empty(&client.next_action, "a short check-in"),
                client
                    .next_action_date
                    .map(|d| format!(" on {d}"))
                    .unwrap_or_default()
            ),
        ),
        EmailTemplate::PaymentReminder => (
            format!("Payment reminder for {}", client.name),
            "Our records show an outstanding invoice on your account. Could you please \
             check the payment status with your finance team? I am happy to help if \
             there are any questions about the invoice."
                .to_string(),
        ),
    };

    let body = format!(
        "Dear {greeting_name},\n\n{paragraph}\n\nBest regards,\n{operator_name}\n"
    );

    EmailDraft {
        to: client.contact.email.clone(),
        subject,
        body,
    }
}

fn non_empty<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.trim().is_empty() {
        fallback
    } else {
        s
    }
}
