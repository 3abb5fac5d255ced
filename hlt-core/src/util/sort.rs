use super::date::parse_place_date;
use hlt_entities::place::Place;

pub trait Dated {
    /// Sort key derived from the free text date.
    fn date_sort_key(&self, current_year: i32) -> i64;
}

impl Dated for Place {
    fn date_sort_key(&self, current_year: i32) -> i64 {
        parse_place_date(self.date.as_deref(), current_year)
    }
}

/// Stable sort: entries with equal (or unknown) dates keep their order.
pub fn sort_by_date<T: Dated>(items: &mut [T], current_year: i32) {
    items.sort_by_cached_key(|x| x.date_sort_key(current_year));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlt_entities::builders::*;

    fn event(id: &str, date: Option<&str>) -> Place {
        Place::build().id(id).date(date).finish()
    }

    #[test]
    fn sort_events_by_date() {
        let mut places = vec![
            event("a", None),
            event("b", Some("Abril")),
            event("c", Some("6 - 8 Feb 2026")),
            event("d", None),
            event("e", Some("Julio - Agosto")),
        ];
        sort_by_date(&mut places, 2026);
        let ids: Vec<_> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(vec!["c", "b", "e", "a", "d"], ids);
    }
}
