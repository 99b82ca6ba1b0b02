use std::time::Duration;

use serde_json::{json, Value};
use tracing::warn;

use crate::domain::entities::group_event::{GroupEvent, GroupEventKind};
use crate::domain::ports::notifier::{NotificationError, Notifier};
use crate::domain::value_objects::status_color::StatusColor;

/// Webhook notification format, auto-detected from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookFormat {
    Slack,
    Discord,
    Generic,
}

/// Posts group events to an HTTP webhook endpoint.
///
/// Supports Slack (colored attachments), Discord (embeds) and generic JSON
/// payloads, picked from the webhook host. Delivery is best effort: HTTP
/// errors are logged, never propagated.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Creates a new webhook notifier targeting the given URL.
    ///
    /// The HTTP client is configured with a 5-second timeout covering
    /// DNS resolution, connection, and response.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::ChannelUnavailable` if the HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(url: String) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                NotificationError::ChannelUnavailable(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self { url, client })
    }

    fn detect_format(&self) -> WebhookFormat {
        // Extract host from URL (scheme://host/path) to avoid substring false positives
        let host = self
            .url
            .split("//")
            .nth(1)
            .and_then(|s| s.split('/').next())
            .and_then(|h| h.split(':').next())
            .unwrap_or("");

        if host == "hooks.slack.com" {
            WebhookFormat::Slack
        } else if host == "discord.com" || host == "discordapp.com" {
            WebhookFormat::Discord
        } else {
            WebhookFormat::Generic
        }
    }

    /// Blocks on the current tokio runtime; without one the payload is
    /// dropped with a warning.
    fn send_payload(&self, payload: &Value) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("Webhook skipped: no async runtime");
            return;
        };

        let result = tokio::task::block_in_place(|| {
            handle.block_on(self.client.post(&self.url).json(payload).send())
        });

        match result {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => warn!("Webhook HTTP {}", resp.status()),
            Err(e) => warn!("Webhook error: {e}"),
        }
    }

    const fn kind_color(kind: GroupEventKind) -> StatusColor {
        match kind {
            GroupEventKind::Updated => StatusColor::Blue,
            GroupEventKind::Removed => StatusColor::Red,
        }
    }

    const fn kind_title(kind: GroupEventKind) -> &'static str {
        match kind {
            GroupEventKind::Updated => "Component group updated",
            GroupEventKind::Removed => "Component group removed",
        }
    }

    fn format_event(&self, event: &GroupEvent) -> Value {
        match self.detect_format() {
            WebhookFormat::Slack => Self::format_event_slack(event),
            WebhookFormat::Discord => Self::format_event_discord(event),
            WebhookFormat::Generic => Self::format_event_generic(event),
        }
    }

    fn format_event_slack(event: &GroupEvent) -> Value {
        json!({
            "attachments": [{
                "color": Self::kind_color(event.kind).hex(),
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": format!("{}: {}", Self::kind_title(event.kind), event.group.name)
                        }
                    },
                    {
                        "type": "section",
                        "fields": [
                            { "type": "mrkdwn", "text": format!("*Group:*\n#{}", event.group.id) },
                            { "type": "mrkdwn", "text": format!("*Parent:*\n#{}", event.group.parent_id) },
                            { "type": "mrkdwn", "text": format!("*Order:*\n{}", event.group.order) },
                            { "type": "mrkdwn", "text": format!("*Collapsed:*\n{}", event.group.collapsed) }
                        ]
                    }
                ]
            }]
        })
    }

    fn format_event_discord(event: &GroupEvent) -> Value {
        json!({
            "username": "statusboard",
            "embeds": [{
                "title": Self::kind_title(event.kind),
                "description": &event.group.name,
                "color": Self::kind_color(event.kind).decimal(),
                "fields": [
                    { "name": "Group", "value": format!("#{}", event.group.id), "inline": true },
                    { "name": "Parent", "value": format!("#{}", event.group.parent_id), "inline": true },
                    { "name": "Order", "value": event.group.order.to_string(), "inline": true },
                    { "name": "Collapsed", "value": event.group.collapsed.as_str(), "inline": true }
                ],
                "timestamp": event.timestamp.to_rfc3339()
            }]
        })
    }

    fn format_event_generic(event: &GroupEvent) -> Value {
        json!({
            "source": "statusboard",
            "event": event.kind.name(),
            "group": &event.group,
            "timestamp": event.timestamp.to_rfc3339()
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError> {
        let payload = self.format_event(event);
        self.send_payload(&payload);
        Ok(())
    }
}
