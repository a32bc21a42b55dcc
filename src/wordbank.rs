use crate::error::GameError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

pub(crate) fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    (!word.is_empty()).then_some(word)
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GameError> {
    let path = path.as_ref();
    let wrap = |source| GameError::WordList {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(wrap)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line.map_err(wrap)?) {
            words.push(word);
        }
    }
    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
