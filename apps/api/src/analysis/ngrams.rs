//! Frequency counts over complaint text (reviews rated 2 stars or lower).
//!
//! Every extractor returns `(term, count)` pairs, most frequent first. Equal
//! counts keep the order in which the terms were first seen. N-grams are
//! windowed over the cleaned tokens of all negative reviews joined in batch
//! order, so a window may run from the end of one review into the next.

use std::collections::HashMap;

use crate::analysis::text::{
    clean_text, clean_tokens, BIGRAM_STOP_WORDS, KEYWORD_STOP_WORDS, NGRAM_2_3_STOP_WORDS,
    TRIGRAM_STOP_WORDS,
};
use crate::models::review::Review;

pub type TermCount = (String, usize);

pub const DEFAULT_TOP_K: usize = 10;
const NEGATIVE_RATING_MAX: u8 = 2;

fn negative(reviews: &[Review]) -> impl Iterator<Item = &Review> {
    reviews.iter().filter(|r| r.rating <= NEGATIVE_RATING_MAX)
}

/// Counts terms, drops those seen fewer than `min_count` times, and ranks the rest.
fn rank_terms(terms: impl Iterator<Item = String>, min_count: usize, top_k: usize) -> Vec<TermCount> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, term) in terms.enumerate() {
        counts.entry(term).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= min_count)
        .map(|(term, (count, first_seen))| (term, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(top_k)
        .map(|(term, count, _)| (term, count))
        .collect()
}

fn ngrams(tokens: &[String], n: usize) -> impl Iterator<Item = String> + '_ {
    tokens.windows(n).map(|w| w.join(" "))
}

/// Cleaned tokens of every negative review, concatenated in batch order.
fn negative_tokens(reviews: &[Review], stop: &[&str]) -> Vec<String> {
    negative(reviews)
        .flat_map(|r| clean_tokens(&r.text, stop))
        .collect()
}

/// Single words from negative reviews, seen at least 3 times.
pub fn extract_negative_keywords(reviews: &[Review], top_k: usize) -> Vec<TermCount> {
    let words = negative(reviews).flat_map(|r| {
        clean_text(&r.text)
            .split_whitespace()
            .filter(|w| w.chars().count() > 2 && !KEYWORD_STOP_WORDS.contains(w))
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    rank_terms(words, 3, top_k)
}

/// Word pairs from negative reviews, seen at least 3 times.
pub fn extract_negative_bigrams(reviews: &[Review], top_k: usize) -> Vec<TermCount> {
    let tokens = negative_tokens(reviews, BIGRAM_STOP_WORDS);
    rank_terms(ngrams(&tokens, 2), 3, top_k)
}

/// Word triples from negative reviews, seen at least twice.
pub fn extract_negative_trigrams(reviews: &[Review], top_k: usize) -> Vec<TermCount> {
    let tokens = negative_tokens(reviews, TRIGRAM_STOP_WORDS);
    rank_terms(ngrams(&tokens, 3), 2, top_k)
}

/// Bigrams and trigrams ranked together, seen at least twice.
pub fn extract_negative_ngram_2_3(reviews: &[Review], top_k: usize) -> Vec<TermCount> {
    let tokens = negative_tokens(reviews, NGRAM_2_3_STOP_WORDS);
    rank_terms(ngrams(&tokens, 2).chain(ngrams(&tokens, 3)), 2, top_k)
}
