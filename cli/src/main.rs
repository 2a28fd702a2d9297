use anyhow::{bail, Result};
use clap::Parser;
use std::{process::ExitCode, sync::Arc};

use livro::{
    ApiClient, BookForm, FormOptions, Inbox, Level, SubmitOutcome, TokenSession,
};

pub mod model;

#[derive(Parser)]
#[command(name = "livro")]
#[command(about = "Create and edit books of the library catalogue")]
struct CliArgs {
    #[arg(long, env = "LIVRO_BASE_URL", help = "Base URL of the library API")]
    base_url: String,

    #[arg(long, env = "LIVRO_TOKEN", help = "Authorization header value")]
    token: String,

    #[arg(long, help = "Show field errors when an update is rejected")]
    field_errors_on_update: bool,

    #[command(subcommand)]
    command: model::Command,
}

struct BookService {
    client: ApiClient,
    session: Arc<TokenSession>,
    inbox: Inbox,
    options: FormOptions,
}

impl BookService {
    fn new(args: &CliArgs) -> Self {
        Self {
            client: ApiClient::new(&args.base_url),
            session: Arc::new(TokenSession::new(args.token.as_str())),
            inbox: Inbox::new(),
            options: FormOptions {
                update_field_errors: args.field_errors_on_update,
            },
        }
    }

    async fn dispatch(&self, command: model::Command) -> Result<()> {
        match command {
            model::Command::Show { id } => {
                let mut form = self.form(Some(model::book_id(id)));
                form.load().await;
                if self.flush() {
                    println!("{}", model::Book(form.draft()));
                    Ok(())
                } else {
                    bail!("não foi possível carregar o livro")
                }
            }
            model::Command::Save { id, fields } => {
                let mut form = self.form(id.map(model::book_id));
                form.load().await;
                if !self.flush() {
                    bail!("não foi possível carregar o livro")
                }

                fields.apply_to(form.draft_mut())?;
                let outcome = form.submit().await;
                self.flush();

                match outcome {
                    SubmitOutcome::Saved => Ok(()),
                    SubmitOutcome::Rejected | SubmitOutcome::Incomplete(_) => {
                        bail!("o livro não foi salvo")
                    }
                }
            }
        }
    }

    fn form(
        &self,
        id: Option<livro::BookId>,
    ) -> BookForm<ApiClient, Arc<TokenSession>, Inbox> {
        BookForm::new(
            self.client.clone(),
            Arc::clone(&self.session),
            self.inbox.clone(),
            id,
        )
        .with_options(self.options)
    }

    /// Prints pending notifications; false if any of them was an error.
    fn flush(&self) -> bool {
        let mut clean = true;
        for notification in self.inbox.drain() {
            match notification.level {
                Level::Success => println!("{}", model::Notice(notification)),
                Level::Warning | Level::Error => {
                    clean = false;
                    eprintln!("{}", model::Notice(notification))
                }
            }
        }
        clean
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = CliArgs::parse();
    let service = BookService::new(&args);

    match service.dispatch(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
