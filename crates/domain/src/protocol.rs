use serde::Serialize;

pub const VERIFICATION_SUBJECT: &str = "Your comment verification code";

/// Outbound message carrying a verification code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    #[serde(skip)]
    pub code: String,
}

pub fn build_verification_email(
    to: &str,
    name: &str,
    code: &str,
    blog_title: &str,
    ttl_minutes: i64,
) -> VerificationEmail {
    let greeting = if name.trim().is_empty() { "there" } else { name };

    let text = format!(
        "Hi {greeting},\n\nUse this 4-digit code to verify your comment for: {blog_title}.\n\nCode: {code}\n\nThis code expires in {ttl_minutes} minutes."
    );
    let html = format!(
        "<p>Hi {},</p><p>Use this 4-digit code to verify your comment for: <b>{}</b>.</p><p style=\"font-size:18px\">Code: <b>{}</b></p><p>This code expires in {} minutes.</p>",
        escape_html(greeting),
        escape_html(blog_title),
        code,
        ttl_minutes
    );

    VerificationEmail {
        to: to.to_string(),
        subject: VERIFICATION_SUBJECT.to_string(),
        text,
        html,
        code: code.to_string(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
