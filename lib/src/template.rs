use crate::error::NotifierError;
use crate::job_outcome::JobOutcome;
use crate::settings::NotifierSettings;
use regex::{Captures, Regex};
use std::fs;

pub const SUCCESS_SUBJECT: &str = "Video Frame Pro - Download Link";
pub const FAILURE_SUBJECT: &str = "Video Frame Pro - Processing Error";

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([a-z_]+)\s*\}\}";

const SUCCESS_HTML: &str = r#"<html>
    <body style="font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 0;">
        <table align="center" width="600" style="background-color: #ffffff; padding: 20px; border-radius: 8px;">
            <tr>
                <td align="center">
                    <img src="{{logo_url}}" alt="Video Frame Pro" style="width: 200px; margin-bottom: 20px;">
                </td>
            </tr>
            <tr>
                <td style="padding: 20px; text-align: center;">
                    <h1 style="color: #4caf50;">Your video is ready!</h1>
                    <p style="font-size: 16px; color: #555;">Click the button below to download your processed video:</p>
                    <a href="{{download_url}}" style="background-color: #4caf50; color: #ffffff; text-decoration: none; padding: 10px 20px; border-radius: 5px; font-size: 16px;">Download Video</a>
                </td>
            </tr>
            <tr>
                <td align="center" style="padding-top: 20px; font-size: 12px; color: #999;">
                    &copy; Video Frame Pro. All rights reserved.
                </td>
            </tr>
        </table>
    </body>
</html>"#;

const FAILURE_HTML: &str = r#"<html>
    <body style="font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 0;">
        <table align="center" width="600" style="background-color: #ffffff; padding: 20px; border-radius: 8px;">
            <tr>
                <td align="center">
                    <img src="{{logo_url}}" alt="Video Frame Pro" style="width: 200px; margin-bottom: 20px;">
                </td>
            </tr>
            <tr>
                <td style="padding: 20px; text-align: center;">
                    <h1 style="color: #ff4c4c;">Oops! Something went wrong</h1>
                    <p style="font-size: 16px; color: #555;">We were unable to complete the processing of your video. Please try again later or contact support if the issue persists.</p>
                </td>
            </tr>
            <tr>
                <td align="center" style="padding-top: 20px;">
                    <a href="mailto:{{support_email}}" style="background-color: #ff4c4c; color: #ffffff; text-decoration: none; padding: 10px 20px; border-radius: 5px; font-size: 16px;">Contact Support</a>
                </td>
            </tr>
            <tr>
                <td align="center" style="padding-top: 20px; font-size: 12px; color: #999;">
                    &copy; Video Frame Pro. All rights reserved.
                </td>
            </tr>
        </table>
    </body>
</html>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub html: String,
}

impl EmailTemplate {
    pub fn new(
        subject: &str,
        html: &str,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            html: html.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_content: String,
}

/// The two fixed notification templates and the values shared by both.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    success: EmailTemplate,
    failure: EmailTemplate,
    support_email: String,
    logo_url: String,
    placeholder: Regex,
}

impl EmailTemplates {
    pub fn new(
        success: EmailTemplate,
        failure: EmailTemplate,
        support_email: &str,
        logo_url: &str,
    ) -> Result<Self, NotifierError> {
        let placeholder = Regex::new(PLACEHOLDER_PATTERN).map_err(|error| NotifierError::new(&error.to_string(), "Failed to compile template placeholder pattern"))?;

        Ok(Self {
            success,
            failure,
            support_email: support_email.to_string(),
            logo_url: logo_url.to_string(),
            placeholder,
        })
    }

    pub fn builtin(
        support_email: &str,
        logo_url: &str,
    ) -> Result<Self, NotifierError> {
        Self::new(
            EmailTemplate::new(SUCCESS_SUBJECT, SUCCESS_HTML),
            EmailTemplate::new(FAILURE_SUBJECT, FAILURE_HTML),
            support_email,
            logo_url,
        )
    }

    pub fn from_settings(settings: &NotifierSettings) -> Result<Self, NotifierError> {
        let success = EmailTemplate::new(
            settings.success_subject.as_deref().unwrap_or(SUCCESS_SUBJECT),
            &load_html(settings.success_template_path.as_deref(), SUCCESS_HTML)?,
        );
        let failure = EmailTemplate::new(
            settings.failure_subject.as_deref().unwrap_or(FAILURE_SUBJECT),
            &load_html(settings.failure_template_path.as_deref(), FAILURE_HTML)?,
        );

        Self::new(success, failure, &settings.support_email, &settings.logo_url)
    }

    pub fn render(
        &self,
        outcome: &JobOutcome,
    ) -> RenderedEmail {
        let (template, download_url) = match outcome {
            JobOutcome::Succeeded { download_url, .. } => (&self.success, Some(download_url.as_str())),
            JobOutcome::Failed { .. } => (&self.failure, None),
        };

        let html_content = self
            .placeholder
            .replace_all(&template.html, |captures: &Captures| {
                let value = match &captures[1] {
                    "logo_url" => Some(self.logo_url.as_str()),
                    "support_email" => Some(self.support_email.as_str()),
                    "download_url" => download_url,
                    _ => None,
                };

                match value {
                    Some(value) => escape_attribute(value),
                    None => captures[0].to_string(),
                }
            })
            .into_owned();

        RenderedEmail {
            subject: template.subject.clone(),
            html_content,
        }
    }
}

fn load_html(
    path: Option<&str>,
    builtin: &str,
) -> Result<String, NotifierError> {
    match path {
        None => Ok(builtin.to_string()),
        Some(path) => fs::read_to_string(path).map_err(|error| NotifierError::new(&format!("{path}: {error}"), "Failed to read email template")),
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(character),
        }
    }
    escaped
}
