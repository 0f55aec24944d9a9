use handlebars::Handlebars;
use lettre::message::{header, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde_json::Value;

use crate::config::{NotifyTemplates, SMTPSettings, Template};
use crate::util::format_code;
use crate::{Error, Result, Success};

use super::definition::AbstractNotifier;

lazy_static! {
    static ref HANDLEBARS: Handlebars<'static> = Handlebars::new();
}

/// Notifier delivering handlebars-rendered templates over SMTP
#[derive(Clone)]
pub struct SmtpNotifier {
    pub smtp: SMTPSettings,
    pub templates: NotifyTemplates,
}

impl SmtpNotifier {
    pub fn new(smtp: SMTPSettings, templates: NotifyTemplates) -> SmtpNotifier {
        SmtpNotifier { smtp, templates }
    }

    fn render(template: &str, variables: &Value) -> Result<String> {
        HANDLEBARS
            .render_template(template, variables)
            .map_err(|_| Error::RenderFail)
    }

    fn build_message(&self, to: &str, template: &Template, variables: &Value) -> Result<Message> {
        let message = Message::builder()
            .from(self.smtp.from.parse().map_err(|_| Error::NotifyFailed)?)
            .to(to.parse().map_err(|_| Error::NotifyFailed)?)
            .subject(template.title.clone());

        let message = if let Some(reply_to) = &self.smtp.reply_to {
            message.reply_to(reply_to.parse().map_err(|_| Error::NotifyFailed)?)
        } else {
            message
        };

        let text = Self::render(&template.text, variables)?;
        let multipart = if let Some(html) = &template.html {
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_PLAIN)
                        .body(text),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_HTML)
                        .body(Self::render(html, variables)?),
                )
        } else {
            MultiPart::mixed().singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(text),
            )
        };

        message.multipart(multipart).map_err(|_| Error::NotifyFailed)
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let builder = if self.smtp.use_tls.unwrap_or(true) {
            SmtpTransport::relay(&self.smtp.host).map_err(|_| Error::NotifyFailed)?
        } else {
            SmtpTransport::builder_dangerous(&self.smtp.host)
        };

        let builder = if let Some(port) = self.smtp.port {
            builder.port(port as u16)
        } else {
            builder
        };

        Ok(builder
            .credentials(Credentials::new(
                self.smtp.username.clone(),
                self.smtp.password.clone(),
            ))
            .build())
    }

    fn send(&self, to: &str, template: &Template, variables: &Value) -> Success {
        let message = self.build_message(to, template, variables)?;

        self.transport()?
            .send(&message)
            .map_err(|_| Error::NotifyFailed)
            .map(|_| ())
    }
}

#[async_trait]
impl AbstractNotifier for SmtpNotifier {
    /// Deliver an access code to the organiser's address
    async fn send_access_code(
        &self,
        to: &str,
        event_id: &str,
        code: &str,
        event_title: &str,
    ) -> Success {
        self.send(
            to,
            &self.templates.access_code,
            &json!({
                "code": code,
                "code_pretty": format_code(code),
                "event_id": event_id,
                "event_title": event_title
            }),
        )
    }

    /// Deliver the event id after creation
    async fn send_event_created(
        &self,
        to: &str,
        event_id: &str,
        event_title: &str,
        date: Option<&str>,
        location: Option<&str>,
    ) -> Success {
        self.send(
            to,
            &self.templates.event_created,
            &json!({
                "event_id": event_id,
                "event_title": event_title,
                "date": date,
                "location": location
            }),
        )
    }
}
