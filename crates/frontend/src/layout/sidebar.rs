//! Navigation menu

use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (path, label, icon)
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Agenda",
            items: vec![
                ("/atendimentos", "Atendimentos", "calendar"),
                ("/relatorios/atendimentos", "Relatório de atendimentos", "file-text"),
            ],
        },
        MenuGroup {
            label: "Cadastros",
            items: vec![
                ("/clientes", "Clientes", "customers"),
                ("/colaboradores", "Colaboradores", "users"),
                ("/setores", "Setores", "building"),
                ("/cargos", "Cargos", "briefcase"),
                ("/etapas", "Etapas", "layers"),
                ("/prioridades", "Prioridades", "flag"),
            ],
        },
        MenuGroup {
            label: "Sistema",
            items: vec![("/minha-conta", "Minha conta", "user")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="app-sidebar__content">
            {menu_groups()
                .into_iter()
                .map(|group| view! {
                    <div class="app-sidebar__group">
                        <div class="app-sidebar__group-label">{group.label}</div>
                        {group
                            .items
                            .into_iter()
                            .map(|(path, label, icon_name)| view! {
                                <A href=path attr:class="app-sidebar__item">
                                    {icon(icon_name)}
                                    <span>{label}</span>
                                </A>
                            })
                            .collect_view()}
                    </div>
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_menu_paths_are_unique_and_absolute() {
        let paths: Vec<&str> = menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(path, _, _)| path))
            .collect();
        assert!(paths.iter().all(|p| p.starts_with('/')));
        assert_eq!(paths.iter().collect::<HashSet<_>>().len(), paths.len());
        assert!(paths.contains(&crate::shared::config::HOME_ROUTE));
    }
}
