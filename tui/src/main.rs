use anyhow::Result;
use clap::Parser;
use cursive::{
    view::{Nameable, Resizable},
    views::{Dialog, EditView, LinearLayout, TextView},
    Cursive,
};
use livro::{
    ApiClient, BookForm, BookId, FormOptions, Inbox, Level, Notification, Notifier,
    SubmitOutcome, TokenSession,
};
use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(name = "livro-tui")]
#[command(about = "Create or edit a book of the library catalogue")]
struct Args {
    #[arg(long, env = "LIVRO_BASE_URL", help = "Base URL of the library API")]
    base_url: String,

    #[arg(long, env = "LIVRO_TOKEN", help = "Authorization header value")]
    token: String,

    #[arg(long, help = "ID of the book to edit; omit to create one")]
    id: Option<String>,

    #[arg(long, help = "Show field errors when an update is rejected")]
    field_errors_on_update: bool,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,
}

type Page = BookForm<ApiClient, Arc<TokenSession>, Inbox>;

const ISBN: &str = "isbn";
const DESCRIPTION: &str = "description";
const AUTHOR: &str = "author";
const RELEASE_DATE: &str = "release-date";

// Callbacks are Send + Sync, so the page lives behind a mutex.
#[derive(Clone)]
struct UserInterface {
    page: Arc<Mutex<Page>>,
    session: Arc<TokenSession>,
    inbox: Inbox,
    runtime: Arc<Runtime>,
}

impl UserInterface {
    fn new(args: &Args) -> Result<Self> {
        let session = Arc::new(TokenSession::new(args.token.as_str()));
        let inbox = Inbox::new();
        let page = BookForm::new(
            ApiClient::new(&args.base_url),
            Arc::clone(&session),
            inbox.clone(),
            args.id.clone().map(BookId),
        )
        .with_options(FormOptions {
            update_field_errors: args.field_errors_on_update,
        });

        Ok(Self {
            page: Arc::new(Mutex::new(page)),
            session,
            inbox,
            runtime: Arc::new(Runtime::new()?),
        })
    }

    fn with_page<A>(&self, f: impl FnOnce(&mut Page) -> A) -> A {
        f(&mut self.page.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn load(&self) {
        self.with_page(|page| self.runtime.block_on(page.load()))
    }

    fn render(&self, siv: &mut Cursive) {
        siv.with_theme(|t| t.shadow = false);

        let (title, draft) = self.with_page(|page| {
            let title = match page.id() {
                Some(id) => format!("Editar livro {id}"),
                None => "Novo livro".to_owned(),
            };
            (title, page.draft().clone())
        });

        let form = LinearLayout::vertical()
            .child(field(
                "Data lançamento (dd/mm/aaaa)",
                RELEASE_DATE,
                &draft.release_date_text(),
            ))
            .child(field("ISBN", ISBN, &draft.isbn))
            .child(field("Descrição", DESCRIPTION, &draft.description))
            .child(field("Autor", AUTHOR, &draft.author));

        let ui = self.clone();
        siv.add_layer(
            Dialog::around(form)
                .title(title)
                .button("Salvar", move |siv| ui.save(siv))
                .button("Sair", |siv| siv.quit()),
        );
        siv.add_global_callback('q', |s| s.quit());
    }

    fn save(&self, siv: &mut Cursive) {
        let content = |siv: &mut Cursive, name: &str| {
            siv.call_on_name(name, |view: &mut EditView| view.get_content().to_string())
                .unwrap_or_default()
        };
        let isbn = content(siv, ISBN);
        let description = content(siv, DESCRIPTION);
        let author = content(siv, AUTHOR);
        let release_date = content(siv, RELEASE_DATE);

        let outcome = self.with_page(|page| {
            let draft = page.draft_mut();
            draft.isbn = isbn;
            draft.description = description;
            draft.author = author;
            if let Err(error) = draft.set_release_date_text(&release_date) {
                self.inbox.notify(Notification::warning(error.to_string()));
                return None;
            }
            Some(self.runtime.block_on(page.submit()))
        });

        // A saved draft is done with; leaving the page discards it.
        let close = matches!(outcome, Some(SubmitOutcome::Saved));
        self.show_notifications(siv, close);
    }

    fn show_notifications(&self, siv: &mut Cursive, close: bool) {
        let leave = close || !self.session.is_active();

        for Notification { level, message } in self.inbox.drain() {
            let title = match level {
                Level::Success => "Sucesso",
                Level::Warning => "Aviso",
                Level::Error => "Erro",
            };
            let dialog = Dialog::text(message).title(title);
            siv.add_layer(if leave {
                dialog.button("Ok", |s| s.quit())
            } else {
                dialog.dismiss_button("Ok")
            });
        }
    }

    fn start(self) {
        self.load();

        let mut siv = cursive::default();
        self.render(&mut siv);
        self.show_notifications(&mut siv, false);
        siv.run();
    }
}

fn field(label: &str, name: &str, content: &str) -> LinearLayout {
    LinearLayout::horizontal()
        .child(TextView::new(label).fixed_width(28))
        .child(EditView::new().content(content).with_name(name).fixed_width(40))
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // cursive owns the terminal; logs only go to a file.
    if let Some(path) = log_file {
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    UserInterface::new(&args)?.start();
    Ok(())
}
