//! Search, partition and sorting helpers shared by list screens

use leptos::prelude::*;
use std::cmp::Ordering;

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive, accent-sensitive substring match. An empty query matches.
pub fn matches_query(haystack: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || haystack.to_lowercase().contains(&query)
}

/// Splits into (active, inactive), keeping only the ones matching `query`.
pub fn partition_active<T, A, S>(items: &[T], query: &str, is_active: A, search_text: S) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    A: Fn(&T) -> bool,
    S: Fn(&T) -> String,
{
    items
        .iter()
        .filter(|item| matches_query(&search_text(item), query))
        .cloned()
        .partition(|item| is_active(item))
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Search box with a clear button
#[component]
pub fn SearchInput(
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    view! {
        <div class="search-input">
            {crate::shared::icons::icon("search")}
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button class="search-input__clear" title="Limpar" on:click=move |_| value.set(String::new())>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        active: bool,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "active" => self.active.cmp(&other.active),
                _ => self.name.cmp(other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Financeiro", active: true },
            Row { name: "Comercial", active: false },
            Row { name: "Fiscal", active: true },
        ]
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query("Financeiro", ""));
        assert!(matches_query("Financeiro", "  FIN "));
        assert!(!matches_query("Financeiro", "xyz"));
    }

    #[test]
    fn test_partition_active() {
        let (active, inactive) = partition_active(&rows(), "", |r| r.active, |r| r.name.to_string());
        assert_eq!(active.len(), 2);
        assert_eq!(inactive, vec![Row { name: "Comercial", active: false }]);

        let (active, inactive) = partition_active(&rows(), "fi", |r| r.active, |r| r.name.to_string());
        assert_eq!(active.iter().map(|r| r.name).collect::<Vec<_>>(), ["Financeiro", "Fiscal"]);
        assert!(inactive.is_empty());
    }

    #[test]
    fn test_sort_list() {
        let mut items = rows();
        sort_list(&mut items, "name", false);
        assert_eq!(items[0].name, "Fiscal");
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].name, "Comercial");
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "active", true), " ⇅");
    }
}
