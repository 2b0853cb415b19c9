//! Operator choice of which boards to migrate.

use migrate_core::{MigrateError, MigrateResult};
use std::collections::BTreeSet;

use crate::destination::ProjectIndex;
use crate::source::Board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSelection {
    /// Every board that has a matching destination project.
    All,
    Titles(BTreeSet<String>),
}

impl BoardSelection {
    pub fn all() -> Self {
        Self::All
    }

    pub fn titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Titles(titles.into_iter().map(Into::into).collect())
    }

    /// Picks titles by 1-based position in `candidates`, as numbered by
    /// the `boards` listing.
    pub fn from_indices(candidates: &[String], indices: &[usize]) -> MigrateResult<Self> {
        let mut titles = BTreeSet::new();
        for &index in indices {
            let title = index
                .checked_sub(1)
                .and_then(|i| candidates.get(i))
                .ok_or_else(|| {
                    MigrateError::Validation(format!(
                        "board number {} is out of range (1-{})",
                        index,
                        candidates.len()
                    ))
                })?;
            titles.insert(title.clone());
        }
        Ok(Self::Titles(titles))
    }

    /// Parses a comma separated list of board numbers such as `1, 3,4`.
    pub fn parse_indices(input: &str) -> MigrateResult<Vec<usize>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>().map_err(|e| {
                    MigrateError::Validation(format!("invalid board number {:?}: {}", part, e))
                })
            })
            .collect()
    }

    pub fn contains(&self, title: &str) -> bool {
        match self {
            Self::All => true,
            Self::Titles(titles) => titles.contains(title),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Titles(titles) if titles.is_empty())
    }
}

/// Titles of boards that have a destination project, sorted and de-duplicated.
pub fn migratable_titles(boards: &[Board], projects: &ProjectIndex) -> Vec<String> {
    boards
        .iter()
        .filter(|board| projects.get(&board.name).is_some())
        .map(|board| board.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Project;

    fn candidates() -> Vec<String> {
        vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()]
    }

    #[test]
    fn test_from_indices() {
        let selection = BoardSelection::from_indices(&candidates(), &[1, 3]).unwrap();
        assert!(selection.contains("Alpha"));
        assert!(!selection.contains("Beta"));
        assert!(selection.contains("Gamma"));
    }

    #[test]
    fn test_from_indices_out_of_range() {
        assert!(BoardSelection::from_indices(&candidates(), &[0]).is_err());
        assert!(BoardSelection::from_indices(&candidates(), &[4]).is_err());
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(
            BoardSelection::parse_indices(" 1, 3,4 ").unwrap(),
            vec![1, 3, 4]
        );
        assert_eq!(BoardSelection::parse_indices("").unwrap(), Vec::<usize>::new());
        assert!(matches!(
            BoardSelection::parse_indices("1,two"),
            Err(MigrateError::Validation(_))
        ));
    }

    #[test]
    fn test_all_and_empty() {
        assert!(BoardSelection::all().contains("anything"));
        assert!(!BoardSelection::all().is_empty());
        assert!(BoardSelection::titles(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_migratable_titles() {
        let boards = vec![
            Board::new("b1", "Zeta"),
            Board::new("b2", "Alpha"),
            Board::new("b3", "Orphan"),
            Board::new("b4", "Alpha"),
        ];
        let projects = ProjectIndex::from_projects(["Alpha", "Zeta"].iter().enumerate().map(
            |(i, title)| Project {
                id: i as i64 + 1,
                title: title.to_string(),
                description: String::new(),
                views: vec![],
            },
        ));

        assert_eq!(
            migratable_titles(&boards, &projects),
            vec!["Alpha".to_string(), "Zeta".to_string()]
        );
    }
}
