//! Content subcommands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use veranda_app::{
    config::AppConfig,
    content::{ContentClient, OauthTokenSource, TokenCache, TokenSource},
};

#[derive(Debug, Args)]
pub(crate) struct ContentCommand {
    #[command(subcommand)]
    command: ContentSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContentSubcommand {
    /// List the most recent articles.
    Articles {
        /// Maximum number of articles to list.
        #[arg(long, default_value_t = 10)]
        first: u32,
    },
    /// Show one article by its site path.
    Article {
        /// Site-relative path, e.g. `/blog/hello-world`.
        path: String,
    },
    /// Show one static page by its site path.
    Page {
        /// Site-relative path, e.g. `/about`.
        path: String,
    },
}

pub(crate) async fn run(config: &AppConfig, command: ContentCommand) -> Result<(), String> {
    let base_url = config
        .content
        .base_url
        .as_ref()
        .ok_or("content backend is not configured; set CONTENT_BASE_URL")?;

    let source = config
        .content
        .client_id
        .as_ref()
        .zip(config.content.client_secret.as_ref())
        .map(|(client_id, client_secret)| {
            Arc::new(OauthTokenSource::new(
                base_url,
                client_id.clone(),
                client_secret.clone(),
            )) as Arc<dyn TokenSource>
        });

    let client = ContentClient::new(base_url, Arc::new(TokenCache::new(source)));

    match command.command {
        ContentSubcommand::Articles { first } => {
            let articles = client
                .articles(first)
                .await
                .map_err(|error| format!("failed to list articles: {error}"))?;

            for article in &articles {
                let created = article
                    .created_at()
                    .map(|timestamp| timestamp.to_string())
                    .unwrap_or_default();

                println!("{}  {}  [{}]", created, article.title, article.path);
            }
        }
        ContentSubcommand::Article { path } => {
            let article = client
                .article_by_path(&path)
                .await
                .map_err(|error| format!("failed to fetch article: {error}"))?
                .ok_or_else(|| format!("no article at {path}"))?;

            println!("{}", article.title);
            println!("{}", article.body.processed);
        }
        ContentSubcommand::Page { path } => {
            let page = client
                .page_by_path(&path)
                .await
                .map_err(|error| format!("failed to fetch page: {error}"))?
                .ok_or_else(|| format!("no page at {path}"))?;

            println!("{}", page.title);
            println!("{}", page.body.processed);
        }
    }

    Ok(())
}
