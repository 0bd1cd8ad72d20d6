//! Page selection
//!
//! Selectors are 1-based and inclusive: `"3"`, `"2-5"`, `"7-"`, `"-4"`,
//! `"even"`, `"odd"`. Each selector string may hold several comma-separated
//! terms. The result is 0-based, ascending and free of duplicates.

use std::collections::BTreeSet;

use crate::types::*;

/// Resolve selectors against `total` pages. An empty slice selects every page.
pub fn resolve_page_selection<S: AsRef<str>>(selectors: &[S], total: usize) -> Result<Vec<usize>> {
    if total == 0 {
        return Err(ImposeError::EmptySourceCollection);
    }
    if selectors.is_empty() {
        return Ok((0..total).collect());
    }

    let mut selected = BTreeSet::new();
    for selector in selectors {
        for term in selector.as_ref().split(',') {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            selected.extend(resolve_term(term, total)?);
        }
    }

    if selected.is_empty() {
        return Err(ImposeError::EmptySourceCollection);
    }
    Ok(selected.into_iter().collect())
}

fn resolve_term(term: &str, total: usize) -> Result<Vec<usize>> {
    match term.to_ascii_lowercase().as_str() {
        "even" => return Ok((1..total).step_by(2).collect()),
        "odd" => return Ok((0..total).step_by(2).collect()),
        _ => {}
    }

    let (first, last) = match term.split_once('-') {
        Some((start, end)) => {
            let first = match start.trim() {
                "" => 1,
                s => parse_page(term, s, total)?,
            };
            let last = match end.trim() {
                "" => total,
                s => parse_page(term, s, total)?,
            };
            (first, last)
        }
        None => {
            let page = parse_page(term, term, total)?;
            (page, page)
        }
    };

    if first > last {
        return Err(ImposeError::invalid_range(
            term,
            format!("start {} is after end {}", first, last),
        ));
    }
    Ok((first - 1..last).collect())
}

fn parse_page(term: &str, value: &str, total: usize) -> Result<usize> {
    let page = value
        .parse::<usize>()
        .map_err(|_| ImposeError::invalid_range(term, format!("{:?} is not a page number", value)))?;
    if page == 0 {
        return Err(ImposeError::invalid_range(term, "pages are numbered from 1"));
    }
    if page > total {
        return Err(ImposeError::invalid_range(
            term,
            format!("page {} exceeds page count {}", page, total),
        ));
    }
    Ok(page)
}
