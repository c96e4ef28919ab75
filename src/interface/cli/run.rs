//! 파싱된 CLI 명령을 실행한다.

use anyhow::Result;
use tracing::info;

use super::command::{CliAction, DraftOptions, LinkOptions};
use super::composition::AppComposition;
use crate::application::config::Config;
use crate::domain::policy::build_prompt;
use crate::domain::session::{SessionQuery, persist_resort_selection, resolve_resort_id};
use crate::infrastructure::providers;
use crate::interface::http::{self, AppState};

/// 명령 실행 결과. `Failed`는 오류 없이 끝났지만 종료 코드 1이 필요한 경우다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failed,
}

pub async fn run_action(composition: &AppComposition, action: CliAction) -> Result<CommandOutcome> {
    match action {
        CliAction::InspectConfig => {
            println!("{}", composition.inspect_config_usecase().execute()?);
            Ok(CommandOutcome::Success)
        }
        CliAction::Serve { bind } => {
            let config = composition.load_config()?;
            serve(composition, &config, bind).await?;
            Ok(CommandOutcome::Success)
        }
        CliAction::Draft(options) => {
            let config = composition.load_config()?;
            draft(composition, &config, options).await?;
            Ok(CommandOutcome::Success)
        }
        CliAction::ListResorts => {
            let config = composition.load_config()?;
            let catalog = composition.load_catalog(&config).await;
            let default_id = catalog.default_record().id.clone();
            for summary in catalog.list_resorts() {
                let marker = if summary.id == default_id { "*" } else { " " };
                println!("{marker} {}\t{} ({})", summary.id, summary.name, summary.location);
            }
            Ok(CommandOutcome::Success)
        }
        CliAction::Link(options) => {
            let config = composition.load_config()?;
            link(composition, &config, options).await;
            Ok(CommandOutcome::Success)
        }
        CliAction::Health { endpoint } => {
            let config = composition.load_config()?;
            let (healthy, status) = providers::build_proxy_gateway(&config, &endpoint)
                .health_check()
                .await?;
            if healthy {
                println!("ok {status} {endpoint}");
                Ok(CommandOutcome::Success)
            } else {
                println!("unhealthy {status} {endpoint}");
                Ok(CommandOutcome::Failed)
            }
        }
    }
}

async fn serve(composition: &AppComposition, config: &Config, bind: Option<String>) -> Result<()> {
    let catalog = composition.load_catalog(config).await;
    let gateway = composition.gateway(config, None);
    let bind = bind.unwrap_or_else(|| config.bind_address());
    let static_dir = config.server.static_dir_for(config.deployment());
    info!(
        deployment = config.deployment().code(),
        static_dir = static_dir.as_deref().unwrap_or("-"),
        "starting review proxy"
    );

    let app = http::router(AppState { catalog, gateway }, static_dir.as_deref());
    http::serve(&bind, app).await
}

async fn draft(composition: &AppComposition, config: &Config, options: DraftOptions) -> Result<()> {
    let catalog = composition.load_catalog(config).await;
    let query = SessionQuery {
        resort: options.resort,
        platform: None,
    };
    let resort = catalog.get_resort(&resolve_resort_id(&query, &catalog));

    if options.prompt_only {
        println!("{}", build_prompt(resort, &options.request));
        return Ok(());
    }

    let gateway = composition.gateway(config, options.endpoint.as_deref());
    let draft = composition
        .generate_review_usecase(gateway.as_ref())
        .execute(resort, &options.request)
        .await;
    eprintln!("[{}]", draft.source.code());
    println!("{}", draft.text);
    Ok(())
}

async fn link(composition: &AppComposition, config: &Config, options: LinkOptions) {
    let catalog = composition.load_catalog(config).await;
    let page_url = match options.resort.as_deref() {
        Some(resort) => persist_resort_selection(&options.page_url, resort),
        None => options.page_url,
    };

    let session = composition
        .resolve_session_usecase(&catalog)
        .execute(&SessionQuery::from_url(&page_url));
    let page_url = persist_resort_selection(&page_url, &session.resort_id);

    println!("{page_url}");
    for link in &session.links {
        let mark = if link.checked { "x" } else { " " };
        println!("[{mark}] {}\t{}", link.name, link.url);
    }
}
