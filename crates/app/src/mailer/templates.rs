//! Mail templates.

/// A message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Every message the application sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTemplate {
    /// Sent at registration, carrying the activation token.
    UserWelcome {
        user_name: String,
        activation_token: String,
        frontend_url: String,
    },

    /// Sent when a password reset is requested.
    PasswordReset {
        reset_token: String,
        frontend_url: String,
    },
}

impl MailTemplate {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserWelcome { .. } => "user_welcome",
            Self::PasswordReset { .. } => "password_reset",
        }
    }

    /// The token a recipient acts on, if the template carries one.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::UserWelcome {
                activation_token, ..
            } => activation_token,
            Self::PasswordReset { reset_token, .. } => reset_token,
        }
    }

    #[must_use]
    pub fn render(&self) -> RenderedMail {
        match self {
            Self::UserWelcome {
                user_name,
                activation_token,
                frontend_url,
            } => {
                let link = format!("{frontend_url}/activate?token={activation_token}");

                RenderedMail {
                    subject: "Welcome to OpenConnect!".to_string(),
                    text_body: format!(
                        "Hi {user_name},\n\n\
                         Thanks for signing up for an OpenConnect account.\n\n\
                         Activate your account within 3 days by visiting:\n{link}\n\n\
                         Or send this token in a PUT /v1/users/activated request:\n\
                         {{\"token\": \"{activation_token}\"}}\n\n\
                         Thanks,\nThe OpenConnect Team\n"
                    ),
                    html_body: format!(
                        "<p>Hi {user_name},</p>\
                         <p>Thanks for signing up for an OpenConnect account.</p>\
                         <p>Activate your account within 3 days: <a href=\"{link}\">{link}</a></p>\
                         <p>Thanks,<br>The OpenConnect Team</p>"
                    ),
                }
            }
            Self::PasswordReset {
                reset_token,
                frontend_url,
            } => {
                let link = format!("{frontend_url}/reset-password?token={reset_token}");

                RenderedMail {
                    subject: "Reset your OpenConnect password".to_string(),
                    text_body: format!(
                        "Hi,\n\n\
                         Reset your password within 45 minutes by visiting:\n{link}\n\n\
                         Or send this token in a PUT /v1/users/password-reset request:\n\
                         {{\"password\": \"your new password\", \"token\": \"{reset_token}\"}}\n\n\
                         If you did not ask for this, ignore this message.\n\n\
                         Thanks,\nThe OpenConnect Team\n"
                    ),
                    html_body: format!(
                        "<p>Hi,</p>\
                         <p>Reset your password within 45 minutes: <a href=\"{link}\">{link}</a></p>\
                         <p>If you did not ask for this, ignore this message.</p>\
                         <p>Thanks,<br>The OpenConnect Team</p>"
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_mail_links_to_activation() {
        let mail = MailTemplate::UserWelcome {
            user_name: "Ivy".to_string(),
            activation_token: "tok".to_string(),
            frontend_url: "https://openconnect.example".to_string(),
        }
        .render();

        assert!(mail.text_body.starts_with("Hi Ivy,"));
        assert!(
            mail.text_body
                .contains("https://openconnect.example/activate?token=tok")
        );
        assert!(mail.text_body.contains("{\"token\": \"tok\"}"));
    }

    #[test]
    fn reset_mail_carries_its_token() {
        let template = MailTemplate::PasswordReset {
            reset_token: "reset".to_string(),
            frontend_url: "https://openconnect.example".to_string(),
        };

        assert_eq!(template.name(), "password_reset");
        assert_eq!(template.token(), "reset");
        assert!(template.render().html_body.contains("reset-password?token=reset"));
    }
}
