use super::keyword::remove_prefix;
use super::pattern::SearchPattern;
use crate::dictionary::embedded::Dictionary;
use crate::dictionary::types::DictionaryEntries;
use crate::entities::repository::Repository;
use crate::entities::types::PopulatedWord;
use crate::error::ApiError;

/// Searches the document store.
///
/// Headwords and spelling variations are tried first; if nothing matches, the
/// keyword is treated as English and matched against every definition. An
/// empty keyword matches every word.
pub async fn search_words(
    repo: &Repository,
    keyword: &str,
) -> Result<Vec<PopulatedWord>, ApiError> {
    let keyword = remove_prefix(keyword);
    let pattern = SearchPattern::for_keyword(keyword)?;

    let words = repo.search_igbo(&pattern).await?;
    if !words.is_empty() {
        tracing::debug!("'{}' matched {} words by headword", keyword, words.len());
        return Ok(words);
    }

    let words = repo.search_english(&pattern).await?;
    tracing::debug!("'{}' matched {} words by definition", keyword, words.len());
    Ok(words)
}

/// Searches the embedded dictionary. Unlike the store search, a keyword is
/// required.
pub fn search_dictionary(
    dictionary: &Dictionary,
    keyword: Option<&str>,
) -> Result<DictionaryEntries, ApiError> {
    let keyword = keyword
        .map(remove_prefix)
        .filter(|keyword| !keyword.is_empty())
        .ok_or(ApiError::NoTermProvided)?;

    let pattern = SearchPattern::new(keyword)?;
    Ok(dictionary.find_search_word(&pattern))
}
