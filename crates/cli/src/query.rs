//! `stockroom query` — one-shot lookups and the interactive loop.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use stockroom_catalog::config::QueryConfig;
use stockroom_catalog::emit::render_query_outcome;
use stockroom_catalog::{resolve, RecordStore};

use crate::load::{load_catalog, CatalogArgs};
use crate::CliError;

pub const PROMPT: &str = "Please enter manufacturer and item type: ";

pub fn cmd_query(catalog: CatalogArgs, text: Vec<String>, json: bool) -> Result<(), CliError> {
    let loaded = load_catalog(&catalog)?;
    let today = catalog.today();

    if text.is_empty() {
        return run_interactive(&loaded.store, &loaded.config.query, today);
    }

    let input = text.join(" ");
    let outcome = resolve(&loaded.store, &input, today);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let json_str = serde_json::to_string_pretty(&outcome).map_err(CliError::json)?;
        writeln!(out, "{json_str}").map_err(CliError::stdout)?;
    } else {
        for line in render_query_outcome(&outcome) {
            writeln!(out, "{line}").map_err(CliError::stdout)?;
        }
    }
    Ok(())
}

/// Interactive loop on the process's stdin/stdout.
pub fn run_interactive(
    store: &RecordStore,
    query: &QueryConfig,
    today: NaiveDate,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let answered = run_session(store, query, today, stdin.lock(), &mut stdout.lock())
        .map_err(CliError::stdout)?;
    log::info!("session ended after {answered} query(ies)");
    Ok(())
}

/// Read queries until the quit token or end of input. Returns the number of
/// queries answered.
pub fn run_session<R: BufRead, W: Write>(
    store: &RecordStore,
    query: &QueryConfig,
    today: NaiveDate,
    mut input: R,
    out: &mut W,
) -> io::Result<usize> {
    writeln!(
        out,
        "\nWelcome to the Inventory Query System! (Enter '{}' to quit)\n",
        query.quit_token
    )?;

    let mut buf = Vec::new();
    let mut answered = 0;
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // end of input: finish the prompt line
            writeln!(out)?;
            break;
        }
        // undecodable bytes become U+FFFD and fall through to "no match"
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if query.is_quit(line) {
            break;
        }

        for rendered in render_query_outcome(&resolve(store, line, today)) {
            writeln!(out, "{rendered}")?;
        }
        writeln!(out)?;
        answered += 1;
    }
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        let mut store = RecordStore::new();
        store.upsert_attribute("A1", "Acme", "Widget", None).unwrap();
        store.upsert_attribute("B1", "Bolt", "Widget", None).unwrap();
        store.upsert_price("A1", "10").unwrap();
        store.upsert_price("B1", "12").unwrap();
        store.upsert_service_date("A1", "12/31/2030").unwrap();
        store.upsert_service_date("B1", "12/31/2030").unwrap();
        store
    }

    fn session(input: &str, query: &QueryConfig) -> (usize, String) {
        session_bytes(input.as_bytes(), query)
    }

    fn session_bytes(input: &[u8], query: &QueryConfig) -> (usize, String) {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut out = Vec::new();
        let answered = run_session(&store(), query, today, input, &mut out).unwrap();
        (answered, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answers_until_quit() {
        let (answered, out) =
            session("acme widget\nacme gadget\nq\nbolt widget\n", &QueryConfig::default());
        assert_eq!(answered, 2);
        assert_eq!(
            out,
            format!(
                "\nWelcome to the Inventory Query System! (Enter 'q' to quit)\n\n\
                 {PROMPT}Your item is: A1, Acme, Widget, 10.0\n\
                 You may, also, consider: B1, Bolt, Widget, 12.0\n\n\
                 {PROMPT}No such item in inventory\n\n\
                 {PROMPT}"
            )
        );
    }

    #[test]
    fn end_of_input_ends_session() {
        let (answered, out) = session("bolt widget\n", &QueryConfig::default());
        assert_eq!(answered, 1);
        assert!(out.contains("Your item is: B1, Bolt, Widget, 12.0\n"));
        assert!(out.contains("You may, also, consider: A1, Acme, Widget, 10.0\n"));
        assert!(out.ends_with(&format!("{PROMPT}\n")));
    }

    #[test]
    fn custom_quit_token() {
        let query = QueryConfig { quit_token: "exit".into() };
        let (answered, out) = session("q\n  EXIT  \nacme widget\n", &query);
        // "q" is an ordinary (unmatched) query here
        assert_eq!(answered, 1);
        assert!(out.contains("(Enter 'exit' to quit)"));
        assert!(!out.contains("Your item is"));
    }

    #[test]
    fn invalid_utf8_line_is_a_miss_not_an_error() {
        let (answered, out) =
            session_bytes(b"\xff\xfe acme\nacme widget\nq\n", &QueryConfig::default());
        assert_eq!(answered, 2);
        assert!(out.contains(&format!("{PROMPT}No such item in inventory\n")));
        assert!(out.contains("Your item is: A1, Acme, Widget, 10.0\n"));
    }

    #[test]
    fn crlf_line_endings() {
        let (answered, out) = session("bolt widget\r\nQ\r\n", &QueryConfig::default());
        assert_eq!(answered, 1);
        assert!(out.contains("Your item is: B1, Bolt, Widget, 12.0\n"));
    }
}
