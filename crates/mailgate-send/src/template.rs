/// Built-in template for the `test` action
///
/// The HTML is fixed; the vendor fills the two substitution variables
/// (`sender_email`, `timestamp`) per recipient.
use chrono::Utc;

pub const TEST_SUBJECT: &str = "Mailgate test email";

pub const TEST_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h1 style="color: #333; font-size: 24px;">Test email</h1>

  <p style="color: #666; font-size: 16px; line-height: 1.5;">
    This is a test message from your Mailgate deployment. If you can read
    this, transactional sending is configured correctly.
  </p>

  <table style="color: #666; font-size: 14px; line-height: 1.6;">
    <tr><td style="padding-right: 10px;"><strong>Sender</strong></td><td>{{sender_email}}</td></tr>
    <tr><td style="padding-right: 10px;"><strong>Sent at</strong></td><td>{{timestamp}}</td></tr>
  </table>

  <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">

  <p style="color: #999; font-size: 12px;">
    Sent by Mailgate
  </p>
</body>
</html>"#;

/// Human-readable send time for the test template
pub fn human_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
