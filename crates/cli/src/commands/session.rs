//! Interactive or scripted shopping session.
//!
//! Reads one command per line, applies it to a [`Session`], and re-renders
//! the view the command affects before reading the next line.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use toko_core::{
    Action, CartError, Catalog, CategoryFilter, FilterCriteria, ParseCategoryError, ProductId,
    Session, SortKey,
};
use tracing::{info, instrument, warn};

use crate::render;

/// Errors in a single command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Category(#[from] ParseCategoryError),
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Command { line: usize, source: CommandError },
    #[error("line {line}: {source}")]
    Cart { line: usize, source: CartError },
    #[error("cannot render cart: {0}")]
    View(CartError),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A state transition.
    Apply(Action),
    /// Show the product list.
    Products,
    /// Show the cart.
    Cart,
    Help,
    Quit,
}

const HELP: &str = "\
Perintah:
  search <teks>       cari produk berdasarkan nama (kosong = semua)
  category <nama>     Semua, Fashion, Gadget, Aksesoris, Kecantikan
  sort <urutan>       terbaru, harga-asc, harga-desc, rating
  add <id>            tambah ke keranjang
  inc <id> / dec <id> ubah jumlah
  rm <id>             hapus dari keranjang
  clear               kosongkan keranjang
  checkout            checkout
  products / cart     tampilkan produk / keranjang
  quit                keluar";

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns `CommandError` for unknown commands, missing arguments, or
/// unknown category names.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let product_id = |name: &'static str| -> Result<ProductId, CommandError> {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(ProductId::new(rest))
        }
    };

    let command = match word.to_lowercase().as_str() {
        "search" | "cari" => Command::Apply(Action::SetQuery {
            query: rest.to_string(),
        }),
        "category" | "kategori" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("category"));
            }
            Command::Apply(Action::SetCategory {
                category: rest.parse::<CategoryFilter>()?,
            })
        }
        "sort" | "urutkan" => Command::Apply(Action::SetSort {
            sort: SortKey::parse_lenient(rest),
        }),
        "add" => Command::Apply(Action::AddToCart {
            product_id: product_id("add")?,
        }),
        "inc" | "+" => Command::Apply(Action::Increment {
            product_id: product_id("inc")?,
        }),
        "dec" | "-" => Command::Apply(Action::Decrement {
            product_id: product_id("dec")?,
        }),
        "rm" | "remove" => Command::Apply(Action::Remove {
            product_id: product_id("rm")?,
        }),
        "clear" | "kosongkan" => Command::Apply(Action::ClearCart),
        "checkout" => Command::Apply(Action::Checkout),
        "products" | "produk" => Command::Products,
        "cart" | "keranjang" => Command::Cart,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Options for a session run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Abort on the first bad command or invalid product reference.
    pub strict: bool,
    /// Print a prompt before each line (interactive use).
    pub prompt: bool,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub actions_applied: usize,
    pub errors: usize,
    pub final_item_count: u64,
}

/// Run a session over `input`, rendering to `out`.
///
/// # Errors
///
/// Returns `SessionError::Io` on read/write failure. In strict mode, also
/// returns the first command or cart error.
#[instrument(skip_all, fields(strict = options.strict))]
pub fn run(
    catalog: &Catalog,
    criteria: FilterCriteria,
    input: impl BufRead,
    out: &mut impl Write,
    options: SessionOptions,
) -> Result<SessionSummary, SessionError> {
    let mut session = Session::with_criteria(catalog, criteria);
    let mut summary = SessionSummary::default();

    if options.prompt {
        show_products(out, &session)?;
        write_prompt(out, &session)?;
    }

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                if options.prompt {
                    write_prompt(out, &session)?;
                }
                continue;
            }
            Err(source) => {
                if options.strict {
                    return Err(SessionError::Command {
                        line: line_no,
                        source,
                    });
                }
                warn!(line = line_no, error = %source, "Skipping bad command");
                writeln!(out, "error: {source}")?;
                summary.errors += 1;
                if options.prompt {
                    write_prompt(out, &session)?;
                }
                continue;
            }
        };

        match command {
            Command::Apply(action) => {
                let shows_cart = affects_cart(&action);
                match session.apply(action) {
                    Ok(()) => summary.actions_applied += 1,
                    Err(source) if options.strict => {
                        return Err(SessionError::Cart {
                            line: line_no,
                            source,
                        });
                    }
                    Err(source) => {
                        writeln!(out, "error: {source}")?;
                        summary.errors += 1;
                    }
                }
                if shows_cart {
                    show_cart(out, &session)?;
                } else {
                    show_products(out, &session)?;
                }
            }
            Command::Products => show_products(out, &session)?,
            Command::Cart => show_cart(out, &session)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }

        if options.prompt {
            write_prompt(out, &session)?;
        }
    }

    summary.final_item_count = session.cart().total_item_count();
    info!(
        actions = summary.actions_applied,
        errors = summary.errors,
        items = summary.final_item_count,
        "Session ended"
    );
    Ok(summary)
}

const fn affects_cart(action: &Action) -> bool {
    !matches!(
        action,
        Action::SetQuery { .. } | Action::SetCategory { .. } | Action::SetSort { .. }
    )
}

fn show_products(out: &mut impl Write, session: &Session<'_>) -> Result<(), SessionError> {
    let view = session.view().map_err(SessionError::View)?;
    render::products(out, session.criteria(), &view.products)?;
    Ok(())
}

fn show_cart(out: &mut impl Write, session: &Session<'_>) -> Result<(), SessionError> {
    let view = session.view().map_err(SessionError::View)?;
    render::cart(out, &view.cart)?;
    Ok(())
}

fn write_prompt(out: &mut impl Write, session: &Session<'_>) -> io::Result<()> {
    write!(out, "toko [{}]> ", session.cart().total_item_count())?;
    out.flush()
}
