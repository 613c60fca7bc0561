use serde::{Deserialize, Serialize};

use crate::collab::IconRenderer;
use crate::dom::Page;
use crate::model::{AlertId, Millis};
use crate::timer::{TimerPurpose, TimerWheel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
    #[serde(untagged)]
    Other(String),
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim().to_ascii_lowercase();
        match name.as_str() {
            "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" | "danger" => Self::Error,
            _ => Self::Other(name),
        }
    }

    pub fn css_class(&self) -> String {
        match self {
            Self::Info => "alert-info".to_string(),
            Self::Success => "alert-success".to_string(),
            Self::Warning => "alert-warning".to_string(),
            Self::Error => "alert-danger".to_string(),
            Self::Other(name) => format!("alert-{}", name.trim().to_ascii_lowercase()),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Warning => "alert-triangle",
            Self::Error => "alert-circle",
            Self::Info | Self::Other(_) => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertView {
    pub id: AlertId,
    pub message: String,
    pub class: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Visible,
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRecord {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Millis,
    pub phase: AlertPhase,
}

#[derive(Debug)]
pub struct AlertManager {
    visible_ms: Millis,
    fade_ms: Millis,
    next_id: u64,
    live: Vec<AlertRecord>,
}

impl AlertManager {
    pub fn new(visible_ms: Millis, fade_ms: Millis) -> Self {
        Self {
            visible_ms,
            fade_ms,
            next_id: 0,
            live: Vec::new(),
        }
    }

    pub fn show(
        &mut self,
        page: &mut dyn Page,
        icons: &mut dyn IconRenderer,
        timers: &mut TimerWheel,
        message: &str,
        severity: Severity,
    ) -> AlertId {
        self.next_id += 1;
        let id = AlertId(self.next_id);
        page.insert_alert(&AlertView {
            id,
            message: message.to_string(),
            class: severity.css_class(),
            icon: severity.icon().to_string(),
        });
        icons.replace_icons();
        timers.arm(self.visible_ms, TimerPurpose::AlertFade(id));

        tracing::debug!(alert = id.0, severity = ?severity, "alert shown");
        self.live.push(AlertRecord {
            id,
            message: message.to_string(),
            severity,
            created_at: timers.now(),
            phase: AlertPhase::Visible,
        });
        id
    }

    pub fn on_fade(&mut self, page: &mut dyn Page, timers: &mut TimerWheel, id: AlertId) {
        let Some(record) = self.live.iter_mut().find(|record| record.id == id) else {
            return;
        };
        record.phase = AlertPhase::Fading;
        page.fade_alert(id);
        timers.arm(self.fade_ms, TimerPurpose::AlertRemove(id));
    }

    pub fn on_remove(&mut self, page: &mut dyn Page, id: AlertId) {
        let before = self.live.len();
        self.live.retain(|record| record.id != id);
        if self.live.len() != before {
            page.remove_alert(id);
        }
    }

    pub fn live(&self) -> &[AlertRecord] {
        &self.live
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertManager, AlertPhase, Severity};
    use crate::collab::RecordingIcons;
    use crate::dom::MemoryPage;
    use crate::timer::{TimerPurpose, TimerWheel};

    #[test]
    fn severities_map_to_class_and_icon() {
        assert_eq!(Severity::parse("error").css_class(), "alert-danger");
        assert_eq!(Severity::parse("SUCCESS").icon(), "check-circle");
        assert_eq!(Severity::parse("warning").icon(), "alert-triangle");
    }

    #[test]
    fn unknown_severity_keeps_class_and_falls_back_to_info_icon() {
        let severity = Severity::parse("primary");
        assert_eq!(severity, Severity::Other("primary".to_string()));
        assert_eq!(severity.css_class(), "alert-primary");
        assert_eq!(severity.icon(), "info");
    }

    #[test]
    fn unknown_severity_class_is_lower_case() {
        assert_eq!(Severity::parse(" Primary ").css_class(), "alert-primary");
        assert_eq!(Severity::Other("Dark".to_string()).css_class(), "alert-dark");
    }

    #[test]
    fn alert_fades_then_is_removed() {
        let mut page = MemoryPage::default();
        let mut icons = RecordingIcons::default();
        let mut timers = TimerWheel::default();
        let mut alerts = AlertManager::new(5_000, 300);

        let id = alerts.show(&mut page, &mut icons, &mut timers, "saved", Severity::Success);
        assert_eq!(page.alerts().len(), 1);
        assert_eq!(icons.calls(), 1);

        let fired = timers.pop_due(5_000).unwrap();
        assert_eq!(fired.purpose, TimerPurpose::AlertFade(id));
        alerts.on_fade(&mut page, &mut timers, id);
        assert_eq!(alerts.live()[0].phase, AlertPhase::Fading);
        assert!(page.alerts()[0].fading);

        let fired = timers.pop_due(5_300).unwrap();
        assert_eq!(fired.purpose, TimerPurpose::AlertRemove(id));
        alerts.on_remove(&mut page, id);
        assert!(page.alerts().is_empty());
        assert!(alerts.live().is_empty());
    }
}
