//! The two emails of the ownership workflow.

use chrono::{DateTime, Utc};

use crate::mail::OutgoingEmail;

/// Details of a manual verification request, sent to the admin.
pub struct ManualRequest<'a> {
    pub admin_email: &'a str,
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub website_name: &'a str,
    pub domain: &'a str,
    pub request_id: &'a str,
    pub base_url: &'a str,
    pub requested_at: DateTime<Utc>,
}

/// Confirmation for a claimant whose ownership was approved.
pub struct OwnershipApproved<'a> {
    pub user_email: &'a str,
    pub user_name: &'a str,
    pub website_name: &'a str,
    pub website_url: Option<&'a str>,
}

pub fn admin_review_link(base_url: &str, request_id: &str) -> String {
    format!("{}/admin/verification?vid={}", base_url.trim_end_matches('/'), request_id)
}

pub fn manual_request(req: &ManualRequest<'_>) -> OutgoingEmail {
    let link = admin_review_link(req.base_url, req.request_id);
    let user_name = escape(req.user_name);
    let user_email = escape(req.user_email);
    let website_name = escape(req.website_name);
    let domain = escape(req.domain);
    let requested_at = req.requested_at.format("%Y-%m-%d %H:%M:%S UTC");
    let request_id = escape(req.request_id);

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2563eb; border-bottom: 2px solid #2563eb; padding-bottom: 10px;">Manual Verification Request</h2>
  <div style="background-color: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #374151; margin-top: 0;">Request Details:</h3>
    <table style="width: 100%; border-collapse: collapse;">
      <tr><td style="padding: 8px 0; font-weight: bold;">User Name:</td><td style="padding: 8px 0;">{user_name}</td></tr>
      <tr><td style="padding: 8px 0; font-weight: bold;">User Email:</td><td style="padding: 8px 0;">{user_email}</td></tr>
      <tr><td style="padding: 8px 0; font-weight: bold;">Website Name:</td><td style="padding: 8px 0;">{website_name}</td></tr>
      <tr><td style="padding: 8px 0; font-weight: bold;">Domain:</td><td style="padding: 8px 0;"><a href="{domain}" target="_blank">{domain}</a></td></tr>
      <tr><td style="padding: 8px 0; font-weight: bold;">Requested At:</td><td style="padding: 8px 0;">{requested_at}</td></tr>
    </table>
  </div>
  <div style="background-color: #dcfce7; padding: 20px; border-radius: 8px; border-left: 4px solid #16a34a; margin: 20px 0;">
    <h3 style="color: #166534; margin-top: 0;">Quick Verification Action</h3>
    <p style="color: #166534;">Click the button below to review and verify this website ownership request:</p>
    <div style="text-align: center;">
      <a href="{link}" style="display: inline-block; background: #16a34a; color: white; padding: 12px 24px; text-decoration: none; border-radius: 8px; font-weight: bold;">Review Verification Request</a>
    </div>
  </div>
  <div style="background-color: #fef3c7; padding: 15px; border-radius: 8px; border-left: 4px solid #f59e0b;">
    <p style="margin: 0; color: #92400e;"><strong>Action Required:</strong> Please review the verification request and approve or reject it through the admin panel.</p>
  </div>
  <div style="margin-top: 20px; padding-top: 20px; border-top: 1px solid #e5e7eb; color: #6b7280; font-size: 12px;">
    This email was automatically generated from the Hustleworthy verification system.<br>
    <strong>Verification Request ID:</strong> {request_id}
  </div>
</div>"#
    );

    OutgoingEmail {
        to: req.admin_email.to_string(),
        reply_to: Some(req.user_email.to_string()),
        subject: format!("Manual Verification Request - {}", req.website_name),
        html,
        text: None,
    }
}

pub fn ownership_approved(msg: &OwnershipApproved<'_>) -> OutgoingEmail {
    let user_name = escape(msg.user_name);
    let user_email = escape(msg.user_email);
    let website_name = escape(msg.website_name);

    let url_row = msg
        .website_url
        .map(|url| {
            let url = escape(url);
            format!(
                r#"<tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">URL:</td><td style="padding: 8px 0;"><a href="{url}" style="color: #2563eb; text-decoration: none;" target="_blank">{url}</a></td></tr>"#
            )
        })
        .unwrap_or_default();

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; background-color: #ffffff;">
  <div style="background: linear-gradient(135deg, #10b981 0%, #059669 100%); padding: 30px; text-align: center; border-radius: 8px 8px 0 0;">
    <h1 style="color: white; margin: 0; font-size: 28px;">🎉 Congratulations!</h1>
    <p style="color: #d1fae5; margin: 10px 0 0 0;">Your website ownership has been approved</p>
  </div>
  <div style="padding: 40px 30px;">
    <p>Hi <strong>{user_name}</strong>,</p>
    <p>Great news! Your ownership claim for <strong>{website_name}</strong> has been successfully approved by our admin team.</p>
    <div style="background-color: #f8fafc; border: 1px solid #e5e7eb; border-radius: 8px; padding: 25px; margin: 25px 0;">
      <h3 style="margin: 0 0 15px 0;">✅ Verified Website Details</h3>
      <table style="width: 100%; border-collapse: collapse;">
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563; width: 120px;">Website:</td><td style="padding: 8px 0;">{website_name}</td></tr>
        {url_row}
        <tr><td style="padding: 8px 0; font-weight: bold; color: #4b5563;">Status:</td><td style="padding: 8px 0;"><span style="background-color: #10b981; color: white; padding: 4px 12px; border-radius: 20px;">✓ Verified Owner</span></td></tr>
      </table>
    </div>
    <div style="background-color: #eff6ff; border-left: 4px solid #3b82f6; padding: 20px; margin: 25px 0;">
      <h3 style="color: #1e40af; margin: 0 0 15px 0;">🚀 What's Next?</h3>
      <ul style="margin: 0; padding-left: 20px;">
        <li>Your verified status will be displayed publicly</li>
        <li>You can now edit the description, ways to earn, tips to earn more, Payout Methods, payment frequency.</li>
      </ul>
    </div>
    <p>Thank you for being part of the Hustleworthy community! If you have any questions, feel free to reach out to our support team.</p>
  </div>
  <div style="background-color: #f9fafb; padding: 25px 30px; text-align: center; border-top: 1px solid #e5e7eb;">
    <p style="color: #6b7280; font-size: 14px;">Best regards,<br><strong>The Hustleworthy Team</strong></p>
    <p style="color: #9ca3af; font-size: 12px;">This email was sent to {user_email}. If you have any questions, please contact our support team.</p>
  </div>
</div>"#
    );

    let url_line = msg
        .website_url
        .map(|url| format!("- URL: {url}\n"))
        .unwrap_or_default();

    let text = format!(
        "Congratulations {}!\n\n\
         Your ownership claim for {} has been successfully approved by our admin team.\n\n\
         Website Details:\n\
         - Website: {}\n\
         {url_line}\
         - Status: ✓ Verified Owner\n\n\
         What's Next?\n\
         • Your verified status will be displayed publicly\n\
         • You can now edit the description, ways to earn, tips, payout methods and payout frequency\n\n\
         Thank you for being part of the Hustleworthy community!\n\n\
         Best regards,\n\
         The Hustleworthy Team\n",
        msg.user_name, msg.website_name, msg.website_name
    );

    OutgoingEmail {
        to: msg.user_email.to_string(),
        reply_to: None,
        subject: format!("🎉 Ownership Approved - {}", msg.website_name),
        html,
        text: Some(text),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> ManualRequest<'static> {
        ManualRequest {
            admin_email: "admin@hustleworthy.com",
            user_name: "Jane",
            user_email: "jane@acme.com",
            website_name: "Acme Corp",
            domain: "https://acme.com",
            request_id: "3f1c",
            base_url: "https://hustleworthy.com/",
            requested_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_manual_request_email() {
        let email = manual_request(&request());
        assert_eq!(email.to, "admin@hustleworthy.com");
        assert_eq!(email.reply_to.as_deref(), Some("jane@acme.com"));
        assert_eq!(email.subject, "Manual Verification Request - Acme Corp");
        assert!(email.html.contains("https://hustleworthy.com/admin/verification?vid=3f1c"));
        assert!(email.html.contains("2025-01-02 03:04:05 UTC"));
    }

    #[test]
    fn test_manual_request_escapes_user_input() {
        let mut req = request();
        req.user_name = "<script>alert(1)</script>";
        let email = manual_request(&req);
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_ownership_approved_email() {
        let email = ownership_approved(&OwnershipApproved {
            user_email: "jane@acme.com",
            user_name: "Jane",
            website_name: "Acme Corp",
            website_url: Some("https://acme.com"),
        });
        assert_eq!(email.subject, "🎉 Ownership Approved - Acme Corp");
        assert_eq!(email.to, "jane@acme.com");
        assert!(email.html.contains(r#"href="https://acme.com""#));
        let text = email.text.unwrap();
        assert!(text.contains("- URL: https://acme.com"));
        assert!(text.starts_with("Congratulations Jane!"));
    }

    #[test]
    fn test_ownership_approved_without_url() {
        let email = ownership_approved(&OwnershipApproved {
            user_email: "jane@acme.com",
            user_name: "Jane",
            website_name: "Acme Corp",
            website_url: None,
        });
        assert!(!email.html.contains("URL:"));
        assert!(!email.text.unwrap().contains("URL:"));
    }
}
