//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};
use url::Url;

use crate::domain::review::ReviewRequest;

#[derive(Debug, Parser)]
#[command(name = "staypilot", version)]
#[command(about = "Guest review drafting and review-link routing for boutique resorts")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the review proxy (and static files in local deployment)
    Serve {
        /// Override the bind address, e.g. 127.0.0.1:8888
        #[arg(long)]
        bind: Option<String>,
    },
    /// Draft a review from the selected features and staff
    Draft {
        /// Resort identifier (catalog default when omitted)
        #[arg(long)]
        resort: Option<String>,
        /// Feature key, repeatable
        #[arg(long = "feature")]
        features: Vec<String>,
        /// Staff display label, repeatable
        #[arg(long = "staff")]
        staff: Vec<String>,
        /// Free-text guest comment
        #[arg(long, default_value = "")]
        comment: String,
        /// Generate through a running proxy instead of the provider directly
        #[arg(long)]
        endpoint: Option<String>,
        /// Print the prompt and exit without calling any service
        #[arg(long)]
        prompt_only: bool,
    },
    /// List resorts in the catalog
    Resorts,
    /// Persist a resort selection into a page URL and list its review links
    Link {
        /// Page URL carrying `resort`/`platform` query parameters
        page_url: String,
        /// Resort to select
        #[arg(long)]
        resort: Option<String>,
    },
    /// Check that a review proxy answers OPTIONS
    Health {
        #[arg(long)]
        endpoint: String,
    },
    /// Show effective merged config (credential shown as its source only)
    Config,
}

#[derive(Debug, Clone)]
pub struct DraftOptions {
    pub resort: Option<String>,
    pub request: ReviewRequest,
    pub endpoint: Option<String>,
    pub prompt_only: bool,
}

#[derive(Debug, Clone)]
pub struct LinkOptions {
    pub page_url: Url,
    pub resort: Option<String>,
}

#[derive(Debug, Clone)]
pub enum CliAction {
    Serve { bind: Option<String> },
    Draft(DraftOptions),
    ListResorts,
    Link(LinkOptions),
    Health { endpoint: String },
    InspectConfig,
}

impl CliAction {
    /// 서버 실행만 기본 로그 레벨을 info로 올린다.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Serve { .. } => "info",
            _ => "warn",
        }
    }
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Self::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        match self.command {
            Commands::Serve { bind } => Ok(CliAction::Serve { bind }),
            Commands::Draft {
                resort,
                features,
                staff,
                comment,
                endpoint,
                prompt_only,
            } => Ok(CliAction::Draft(DraftOptions {
                resort,
                request: ReviewRequest::new(features, staff, comment),
                endpoint,
                prompt_only,
            })),
            Commands::Resorts => Ok(CliAction::ListResorts),
            Commands::Link { page_url, resort } => {
                let page_url = Url::parse(&page_url)
                    .map_err(|err| format!("invalid page URL `{page_url}`: {err}"))?;
                Ok(CliAction::Link(LinkOptions { page_url, resort }))
            }
            Commands::Health { endpoint } => {
                Url::parse(&endpoint)
                    .map_err(|err| format!("invalid endpoint `{endpoint}`: {err}"))?;
                Ok(CliAction::Health { endpoint })
            }
            Commands::Config => Ok(CliAction::InspectConfig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliAction, String> {
        Cli::try_parse_from(args)
            .map_err(|err| err.to_string())?
            .into_action()
    }

    #[test]
    fn draft_collects_repeated_flags() {
        let action = parse(&[
            "staypilot",
            "draft",
            "--resort",
            "domes-white-coast-milos",
            "--feature",
            "ambiance",
            "--feature",
            "spa",
            "--staff",
            "Nikos (Pool Bar)",
            "--comment",
            "Perfect honeymoon",
        ])
        .expect("parse");

        let CliAction::Draft(options) = action else {
            panic!("expected draft");
        };
        assert_eq!(options.resort.as_deref(), Some("domes-white-coast-milos"));
        assert_eq!(options.request.feature_keys, ["ambiance", "spa"]);
        assert_eq!(options.request.staff_labels, ["Nikos (Pool Bar)"]);
        assert_eq!(options.request.comment, "Perfect honeymoon");
        assert!(!options.prompt_only);
    }

    #[test]
    fn link_requires_an_absolute_url() {
        assert!(parse(&["staypilot", "link", "not a url"]).is_err());
        assert!(matches!(
            parse(&["staypilot", "link", "https://reviews.example/?platform=google"]),
            Ok(CliAction::Link(_))
        ));
    }

    #[test]
    fn only_serve_logs_at_info() {
        assert_eq!(
            parse(&["staypilot", "serve"]).expect("parse").default_log_filter(),
            "info"
        );
        assert_eq!(
            parse(&["staypilot", "resorts"]).expect("parse").default_log_filter(),
            "warn"
        );
    }
}
