//! Maps the selected view to a panel model. Rendering reads session state and
//! fresh metrics but never writes.

use crate::actions::Action;
use crate::config::{AiStatus, BotConfig, ModelSettings};
use crate::metrics::{self, CategoryProgress, CategoryShare, SenderCount, VolumePoint};
use crate::state::{Preferences, RunKind, SessionState, View};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Dashboard(DashboardPanel),
    CleanupTools(CleanupPanel),
    Analytics(AnalyticsPanel),
    Settings(SettingsPanel),
}

impl Panel {
    pub fn view(&self) -> View {
        match self {
            Panel::Dashboard(_) => View::Dashboard,
            Panel::CleanupTools(_) => View::CleanupTools,
            Panel::Analytics(_) => View::Analytics,
            Panel::Settings(_) => View::Settings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPanel {
    pub ai_status: AiStatus,
    pub connection: ConnectionBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionBlock {
    NotConnected { connect: Action },
    Connected {
        cards: Vec<MetricCard>,
        gauges: Vec<CategoryProgress>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanupPanel {
    pub features: Vec<FeatureCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    pub trigger: Trigger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub label: &'static str,
    pub action: Action,
    pub enabled: bool,
    pub progress: Option<RunProgress>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunProgress {
    pub label: &'static str,
    pub fraction: f32,
    pub step: u32,
    pub total: u32,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsPanel {
    pub volume: Vec<VolumePoint>,
    pub top_senders: Vec<SenderCount>,
    pub categories: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    pub saved: Option<Preferences>,
    pub model: ModelSettings,
}

pub fn render(view: View, state: &SessionState, config: &BotConfig) -> Panel {
    match view {
        View::Dashboard => Panel::Dashboard(render_dashboard(state, config)),
        View::CleanupTools => Panel::CleanupTools(render_cleanup(state)),
        View::Analytics => Panel::Analytics(AnalyticsPanel {
            volume: metrics::email_volume(),
            top_senders: metrics::top_senders(),
            categories: metrics::categories(),
        }),
        View::Settings => Panel::Settings(SettingsPanel {
            saved: state.saved_preferences().cloned(),
            model: config.model.clone(),
        }),
    }
}

fn render_dashboard(state: &SessionState, config: &BotConfig) -> DashboardPanel {
    let connection = if state.connected() {
        let snap = metrics::snapshot(state);
        ConnectionBlock::Connected {
            cards: vec![
                MetricCard {
                    title: "Total Emails",
                    value: snap.total_emails.to_string(),
                },
                MetricCard {
                    title: "Emails Cleaned",
                    value: snap.cleaned_emails.to_string(),
                },
                MetricCard {
                    title: "Space Saved",
                    value: snap.space_saved_label,
                },
                MetricCard {
                    title: "Time Saved",
                    value: snap.time_saved_label,
                },
            ],
            gauges: snap.progress_by_category,
        }
    } else {
        ConnectionBlock::NotConnected {
            connect: Action::Connect,
        }
    };

    DashboardPanel {
        ai_status: config.ai_status(),
        connection,
    }
}

fn render_cleanup(state: &SessionState) -> CleanupPanel {
    let run_trigger = |label, action, kind: RunKind| {
        let progress = state.active_run(kind).map(|active| RunProgress {
            label: kind.running_label(),
            fraction: active.run.fraction(),
            step: active.run.current_step(),
            total: active.run.total_steps(),
            elapsed: active.run.elapsed(),
        });
        Trigger {
            label,
            action,
            enabled: progress.is_none(),
            progress,
        }
    };
    let instant_trigger = |label, action| Trigger {
        label,
        action,
        enabled: true,
        progress: None,
    };

    CleanupPanel {
        features: vec![
            FeatureCard {
                title: "Smart Spam Removal",
                description: "AI-powered detection of spam and promotional emails",
                highlights: &[
                    "Advanced pattern recognition",
                    "Safe whitelist protection",
                    "Bulk processing",
                ],
                trigger: run_trigger(
                    "Start Spam Cleanup",
                    Action::StartSpamCleanup,
                    RunKind::SpamCleanup,
                ),
            },
            FeatureCard {
                title: "Smart Organization",
                description: "Automatically sort emails into relevant folders",
                highlights: &["Bills & Finance", "Work & Business", "Personal & Family"],
                trigger: run_trigger(
                    "Organize Inbox",
                    Action::OrganizeInbox,
                    RunKind::OrganizeInbox,
                ),
            },
            FeatureCard {
                title: "Unsubscribe Assistant",
                description: "Safely unsubscribe from unwanted newsletters",
                highlights: &[],
                trigger: instant_trigger("Bulk Unsubscribe", Action::BulkUnsubscribe),
            },
            FeatureCard {
                title: "Email Analytics",
                description: "Insights into your email patterns and habits",
                highlights: &[],
                trigger: instant_trigger("View Analytics", Action::ViewAnalytics),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::tests::{handlers, Recorder};
    use crate::error::AppError;
    use crate::state::SessionStore;
    use std::collections::HashMap;

    fn config_with_openai() -> BotConfig {
        let mut store = HashMap::new();
        store.insert("OPENAI_API_KEY".to_string(), "sk-test".to_string());
        BotConfig::load(&store)
    }

    fn config_without_keys() -> BotConfig {
        BotConfig::load(&HashMap::<String, String>::new())
    }

    #[test]
    fn every_view_renders_its_own_panel() {
        let state = SessionState::default();
        let config = config_with_openai();
        for view in View::ALL {
            assert_eq!(render(view, &state, &config).view(), view);
        }
    }

    #[test]
    fn render_does_not_mutate_state() {
        let state = SessionState::default();
        let config = config_with_openai();
        for view in View::ALL {
            render(view, &state, &config);
        }
        assert_eq!(state.current_view(), View::Dashboard);
        assert!(state.notices().is_empty());
    }

    #[test]
    fn unknown_key_is_invalid_view() {
        let state = SessionState::default();
        let config = config_with_openai();
        let render_key = |key: &str| View::from_key(key).map(|view| render(view, &state, &config));
        assert_eq!(
            render_key("Inbox Zero"),
            Err(AppError::InvalidView("Inbox Zero".to_string()))
        );
        assert_eq!(render_key("Cleanup Tools").unwrap().view(), View::CleanupTools);
    }

    #[test]
    fn dashboard_before_and_after_connect() {
        let recorder = Recorder::default();
        let h = handlers(&recorder);
        let config = config_with_openai();
        let mut store = SessionStore::new();
        let state = store.init_if_absent();

        let Panel::Dashboard(before) = render(View::Dashboard, state, &config) else {
            panic!("expected dashboard");
        };
        assert_eq!(
            before.connection,
            ConnectionBlock::NotConnected {
                connect: Action::Connect
            }
        );

        h.dispatch(state, Action::Connect);

        let Panel::Dashboard(after) = render(View::Dashboard, state, &config) else {
            panic!("expected dashboard");
        };
        let ConnectionBlock::Connected { cards, gauges } = after.connection else {
            panic!("expected connected dashboard");
        };
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "Total Emails");
        assert_eq!(cards[0].value, "1247");
        assert_eq!(cards[1].title, "Emails Cleaned");
        assert_eq!(cards[1].value, "342");
        assert_eq!(gauges.len(), 3);
    }

    #[test]
    fn missing_openai_key_degrades_but_all_panels_render() {
        let config = config_without_keys();
        assert!(!config.validate_keys());
        let state = SessionState::default();

        let Panel::Dashboard(dashboard) = render(View::Dashboard, &state, &config) else {
            panic!("expected dashboard");
        };
        assert_eq!(
            dashboard.ai_status,
            AiStatus::Degraded {
                missing: vec!["OPENAI_API_KEY"]
            }
        );
        for view in View::ALL {
            assert_eq!(render(view, &state, &config).view(), view);
        }
    }

    #[test]
    fn running_cleanup_disables_its_trigger() {
        let recorder = Recorder::default();
        let h = handlers(&recorder);
        let mut state = SessionState::default();
        let id = h.start_spam_cleanup(&mut state).unwrap();
        h.apply_tick(&mut state, id, RunKind::SpamCleanup, 25);

        let Panel::CleanupTools(panel) = render(View::CleanupTools, &state, &config_without_keys())
        else {
            panic!("expected cleanup tools");
        };
        let spam = &panel.features[0].trigger;
        assert!(!spam.enabled);
        let progress = spam.progress.as_ref().unwrap();
        assert_eq!(progress.step, 25);
        assert!((progress.fraction - 0.25).abs() < f32::EPSILON);
        assert!(panel.features[1].trigger.enabled);
    }

    #[test]
    fn analytics_panel_carries_series() {
        let Panel::Analytics(panel) =
            render(View::Analytics, &SessionState::default(), &config_without_keys())
        else {
            panic!("expected analytics");
        };
        assert_eq!(panel.volume.len(), 242);
        assert_eq!(panel.top_senders.len(), 6);
        assert_eq!(panel.categories.len(), 5);
    }

    #[test]
    fn settings_panel_echoes_saved_preferences() {
        let recorder = Recorder::default();
        let h = handlers(&recorder);
        let mut state = SessionState::default();
        let preferences = Preferences {
            smart_filters: false,
            ..Preferences::default()
        };
        h.dispatch(&mut state, Action::SaveSettings(preferences.clone()));

        let Panel::Settings(panel) = render(View::Settings, &state, &config_without_keys()) else {
            panic!("expected settings");
        };
        assert_eq!(panel.saved, Some(preferences));
        assert_eq!(panel.model.model, "gpt-4o-mini");
    }
}
