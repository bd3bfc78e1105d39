use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use wordbook_client::{ResourceKind, WordbookClient};
use wordbook_core::preprocess::{normalize_input, normalize_word};
use wordbook_core::{
    Dictionary, DictionaryCache, DictionarySource, MatchScope, Resolution, filter,
    load_dictionaries, resolve,
};

use crate::cli::Command;
use crate::output;

/// Everything a command needs, built once in `main`
pub struct App {
    pub client: Arc<WordbookClient>,
    /// Where the dictionary list comes from on a cache miss; the client
    /// unless replaced
    pub source: Arc<dyn DictionarySource>,
    pub cache: DictionaryCache,
}

impl App {
    pub fn new(client: WordbookClient, cache: DictionaryCache) -> Self {
        let client = Arc::new(client);
        Self {
            source: client.clone(),
            client,
            cache,
        }
    }

    #[cfg(test)]
    pub fn with_source(mut self, source: Arc<dyn DictionarySource>) -> Self {
        self.source = source;
        self
    }

    async fn dictionaries(&self) -> Result<Vec<Dictionary>> {
        load_dictionaries(self.source.as_ref(), &self.cache)
            .await
            .context("Error getting dictionary list!")
    }
}

pub async fn run(app: &App, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List => {
            let dicts = app.dictionaries().await?;
            output::dictionaries(out, &dicts)?;
        }
        Command::Search {
            query,
            id,
            short,
            long,
        } => {
            let dicts = app.dictionaries().await?;
            search(&dicts, &query, MatchScope { id, short, long }, out)?;
        }
        Command::Suggestions {
            word,
            dictionary,
            definition,
        } => suggestions(app, &word, dictionary.as_deref(), definition, out).await?,
        Command::Info {
            dictionary,
            alphabet,
        } => {
            let kind = if alphabet {
                ResourceKind::Alphabet
            } else {
                ResourceKind::Info
            };
            info(app, &dictionary, kind, out).await?;
        }
    }
    Ok(())
}

fn search(dicts: &[Dictionary], query: &str, scope: MatchScope, out: &mut impl Write) -> Result<()> {
    let query = normalize_input(query);
    let found = filter(dicts, &query, scope);
    tracing::debug!("'{}' matched {} of {} dictionaries", query, found.len(), dicts.len());
    output::dictionaries(out, found)?;
    Ok(())
}

/// Pick the dictionary named by `text`; several matches are an error
fn pick<'a>(dicts: &'a [Dictionary], text: &str) -> Result<Option<&'a Dictionary>> {
    match resolve(dicts, &normalize_input(text)) {
        Resolution::Unique(dict) => Ok(Some(dict)),
        Resolution::NoMatch => Ok(None),
        Resolution::Ambiguous(found) => {
            let mut listing = Vec::new();
            writeln!(listing, "{}", "-".repeat(25))?;
            output::dictionaries(&mut listing, found)?;
            bail!(
                "A Dictionary lookup for '{}', gave multiple results\n{}",
                text,
                String::from_utf8_lossy(&listing).trim_end()
            )
        }
    }
}

async fn suggestions(
    app: &App,
    word: &str,
    dictionary: Option<&str>,
    with_definitions: bool,
    out: &mut impl Write,
) -> Result<()> {
    let word = normalize_word(word);

    let dicts = match dictionary {
        Some(_) => app.dictionaries().await?,
        None => Vec::new(),
    };
    let selected = match dictionary {
        Some(text) => {
            let selected = pick(&dicts, text)?;
            if selected.is_none() {
                tracing::warn!("No dictionary matches '{}', searching all dictionaries", text);
            }
            selected
        }
        None => None,
    };

    writeln!(out, "Getting suggestions for: '{}'", word)?;
    match selected {
        Some(dict) => writeln!(out, "Using dictionary: '{} (#{})'", dict.long(), dict.id())?,
        None => writeln!(out, "Using dictionary: 'All'")?,
    }

    let found = app
        .client
        .suggestions(&word, selected.map(Dictionary::id))
        .await
        .context("Error getting suggestions!")?;

    if found.is_empty() {
        writeln!(out, "No matches found!")?;
        return Ok(());
    }

    for suggestion in &found {
        output::word(out, suggestion)?;
        writeln!(out)?;

        if with_definitions {
            let query = suggestion.definition_query()?;
            let definitions = app
                .client
                .definitions(&query)
                .await
                .with_context(|| format!("Error getting definitions for '{}'", suggestion.word))?;
            output::definitions(out, &definitions)?;
        }

        writeln!(out)?;
    }
    Ok(())
}

async fn info(app: &App, text: &str, kind: ResourceKind, out: &mut impl Write) -> Result<()> {
    let dicts = app.dictionaries().await?;
    let Some(dict) = pick(&dicts, text)? else {
        bail!("No dictionary matches '{}'", text);
    };

    output::dictionary(out, dict)?;
    let resource = app
        .client
        .resource(dict, kind)
        .await
        .with_context(|| format!("Error getting {:?} for dictionary {}", kind, dict.id()))?;

    match resource {
        Some(text) => writeln!(out, "{}", text)?,
        None => writeln!(out, "No {:?} text available", kind)?,
    }
    Ok(())
}
