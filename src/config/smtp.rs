/// SMTP mail server configuration
#[derive(Serialize, Deserialize, Clone)]
pub struct SMTPSettings {
    /// Sender address
    pub from: String,

    /// Reply-To address
    pub reply_to: Option<String>,

    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: Option<i32>,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Whether to use TLS
    pub use_tls: Option<bool>,
}

/// Email template
#[derive(Serialize, Deserialize, Clone)]
pub struct Template {
    /// Title of the email
    pub title: String,

    /// Plain text version of this email
    pub text: String,

    /// HTML version of this email
    pub html: Option<String>,
}

/// Email templates
#[derive(Serialize, Deserialize, Clone)]
pub struct NotifyTemplates {
    /// Sent when an organiser requests management access
    ///
    /// Variables: `{{code}}`, `{{code_pretty}}`, `{{event_id}}`,
    /// `{{event_title}}`.
    pub access_code: Template,

    /// Sent once after an event is created
    ///
    /// Variables: `{{event_id}}`, `{{event_title}}`, `{{date}}`,
    /// `{{location}}`.
    pub event_created: Template,
}
