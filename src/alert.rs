//! Queued user-facing messages rendered at the top of the page.
//!
//! Fetch-path failures surface here instead of failing the request: the
//! dashboard renders zeroed totals alongside a warning describing what went
//! wrong and, where possible, what to do about it.

use maud::{Markup, html};

/// The severity of an alert, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Neutral information.
    Info,
    /// Something is degraded but actionable, e.g. a bank re-link.
    Warning,
    /// A failure that left the page without data.
    Danger,
}

/// A message queued for display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// The severity of the message.
    pub level: AlertLevel,
    /// The message text.
    pub message: String,
}

impl Alert {
    /// Create a neutral informational alert.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning alert.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Warning,
            message: message.into(),
        }
    }

    /// Create a danger alert.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Danger,
            message: message.into(),
        }
    }
}

/// Render the queued alerts as a banner list. Empty input renders nothing.
pub fn alert_banners(alerts: &[Alert]) -> Markup {
    html! {
        @if !alerts.is_empty() {
            section class="alerts" {
                @for alert in alerts {
                    div class=(alert_class(alert.level)) role="alert" {
                        (alert.message)
                    }
                }
            }
        }
    }
}

fn alert_class(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Info => "alert alert-info",
        AlertLevel::Warning => "alert alert-warning",
        AlertLevel::Danger => "alert alert-danger",
    }
}

#[cfg(test)]
mod tests {
    use super::{Alert, AlertLevel, alert_banners};

    #[test]
    fn constructors_set_the_level() {
        assert_eq!(Alert::info("hi").level, AlertLevel::Info);
        assert_eq!(Alert::warning("hmm").level, AlertLevel::Warning);
        assert_eq!(Alert::danger("oh no").level, AlertLevel::Danger);
    }

    #[test]
    fn renders_one_banner_per_alert() {
        let alerts = [Alert::warning("re-link required"), Alert::danger("fetch failed")];

        let markup = alert_banners(&alerts).into_string();

        assert!(markup.contains("re-link required"));
        assert!(markup.contains("fetch failed"));
        assert!(markup.contains("alert-warning"));
        assert!(markup.contains("alert-danger"));
    }

    #[test]
    fn renders_nothing_for_no_alerts() {
        assert!(alert_banners(&[]).into_string().is_empty());
    }
}
