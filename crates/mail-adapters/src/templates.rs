//! Email composition.
//!
//! Each outbound message is rendered twice: an HTML body (Askama, with
//! auto-escaping) and a plain-text fallback. The customer auto-reply embeds
//! a `mailto:` deep link that pre-fills a reply back to the admin address.

use askama::Template;
use chrono::Datelike;

use domains::ContactSubmission;

/// Subject plus both body variants, ready to hand to the provider.
#[derive(Debug)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Template)]
#[template(path = "admin_alert.html")]
struct AdminAlertHtml<'a> {
    business_name: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    service: &'a str,
    message: &'a str,
    submitted_at: String,
    year: i32,
}

#[derive(Template)]
#[template(path = "admin_alert.txt")]
struct AdminAlertText<'a> {
    business_name: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    service: &'a str,
    message: &'a str,
    submitted_at: String,
}

#[derive(Template)]
#[template(path = "customer_reply.html")]
struct CustomerReplyHtml<'a> {
    business_name: &'a str,
    name: &'a str,
    service_label: &'a str,
    admin_email: &'a str,
    reply_subject: String,
    reply_body: String,
    site_phone: &'a str,
    year: i32,
}

#[derive(Template)]
#[template(path = "customer_reply.txt")]
struct CustomerReplyText<'a> {
    business_name: &'a str,
    name: &'a str,
    service_label: &'a str,
    site_phone: &'a str,
}

/// Composes the internal notification summarizing a new submission.
pub fn admin_alert(
    submission: &ContactSubmission,
    business_name: &str,
) -> askama::Result<RenderedEmail> {
    let service = submission.service.as_deref().unwrap_or("—");
    let phone = submission.phone.as_deref().unwrap_or("—");
    let submitted_at = submission.submitted_at.to_rfc2822();

    let subject = format!(
        "New contact — {} ({})",
        submission.name,
        submission.service.as_deref().unwrap_or("General")
    );

    let html = AdminAlertHtml {
        business_name,
        name: &submission.name,
        email: &submission.email,
        phone,
        service,
        message: &submission.message,
        submitted_at: submitted_at.clone(),
        year: submission.submitted_at.year(),
    }
    .render()?;

    let text = AdminAlertText {
        business_name,
        name: &submission.name,
        email: &submission.email,
        phone: submission.phone.as_deref().unwrap_or("-"),
        service: submission.service.as_deref().unwrap_or("-"),
        message: &submission.message,
        submitted_at,
    }
    .render()?;

    Ok(RenderedEmail {
        subject,
        html,
        text,
    })
}

/// Composes the acknowledgment sent back to the submitter.
pub fn customer_reply(
    submission: &ContactSubmission,
    business_name: &str,
    admin_email: &str,
    site_phone: Option<&str>,
) -> askama::Result<RenderedEmail> {
    let service_label = submission.service.as_deref().unwrap_or("a project enquiry");
    let site_phone = site_phone.unwrap_or("our office");

    let reply_subject = format!(
        "Re: {}",
        submission.service.as_deref().unwrap_or("Your request")
    );
    let reply_body = [
        format!("Hello {business_name},"),
        String::new(),
        format!(
            "I am {} ({}). I'm replying regarding my request: {}",
            submission.name,
            submission.email,
            submission.service.as_deref().unwrap_or("")
        ),
        String::new(),
        "Original message:".to_string(),
        submission.message.clone(),
        String::new(),
        format!("Phone: {}", submission.phone.as_deref().unwrap_or("")),
    ]
    .join("\n");

    let html = CustomerReplyHtml {
        business_name,
        name: &submission.name,
        service_label,
        admin_email,
        reply_subject: reply_subject.clone(),
        reply_body,
        site_phone,
        year: submission.submitted_at.year(),
    }
    .render()?;

    let text = CustomerReplyText {
        business_name,
        name: &submission.name,
        service_label,
        site_phone,
    }
    .render()?;

    Ok(RenderedEmail {
        subject: "Thanks — We received your request".to_string(),
        html,
        text,
    })
}
