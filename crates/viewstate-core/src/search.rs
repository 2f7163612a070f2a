use viewstate_models::CatalogItem;
use crate::catalog::CatalogIndex;

impl CatalogIndex {
    /// Case-insensitive substring search over title, description and genre.
    ///
    /// A blank query matches nothing. Results keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.items()
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
                    || item.genre.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Items with a genre equal to `genre`, ignoring case
    pub fn by_genre(&self, genre: &str) -> Vec<&CatalogItem> {
        let wanted = genre.trim().to_lowercase();
        if wanted.is_empty() {
            return Vec::new();
        }

        self.items()
            .iter()
            .filter(|item| item.genres().any(|g| g.to_lowercase() == wanted))
            .collect()
    }

    /// Distinct genres in order of first appearance
    pub fn genres(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for genre in self.items().iter().flat_map(|item| item.genres()) {
            if !seen.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
                seen.push(genre);
            }
        }
        seen
    }
}
