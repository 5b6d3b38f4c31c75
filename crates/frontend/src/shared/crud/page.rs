//! Generic list page: cards or table, search, and the form/view/delete
//! dialogs for any [`EntityUi`] record.

use contracts::domain::common::{CrudEntity, Resource, ValidationContext};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use thaw::*;

use super::entity_ui::EntityUi;
use super::form::DetailList;
use super::mutation::Mutation;
use super::state::{CrudPageState, ViewMode};
use crate::shared::crud_api;
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::list_utils::{partition_active, SearchInput};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{page_id, PageFrame, PAGE_CAT_LIST};
use crate::shared::query_cache::ListQuery;

struct RowActions<E: 'static> {
    view: Callback<E>,
    edit: Callback<E>,
    delete: Callback<E>,
    reactivate: Callback<E>,
}

impl<E> Clone for RowActions<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for RowActions<E> {}

fn record_label<E: Resource>() -> String {
    format!("Cadastro de {}", E::element_name().to_lowercase())
}

pub fn crud_page<E: EntityUi>() -> impl IntoView {
    let query = ListQuery::<E>::of();
    let state = RwSignal::new(CrudPageState::<E>::default());
    let search = RwSignal::new(String::new());
    let form = RwSignal::new(E::Form::default());
    let errors = RwSignal::new(FieldErrors::new());
    let mutation = Mutation::new(E::collection_name());
    let pending = mutation.is_pending();

    let lists = Signal::derive(move || {
        let q = search.get();
        query
            .items
            .with(|items| partition_active(items, &q, E::is_active, <E as CrudEntity>::search_text))
    });

    let open_create = move || {
        form.set(E::Form::default());
        errors.set(FieldErrors::new());
        state.update(|s| s.open_create());
    };

    let actions = RowActions {
        view: Callback::new(move |item: E| state.update(|s| s.open_view(item))),
        edit: Callback::new(move |item: E| {
            form.set(item.to_form());
            errors.set(FieldErrors::new());
            state.update(|s| s.open_edit(item));
        }),
        delete: Callback::new(move |item: E| state.update(|s| s.open_delete(item))),
        reactivate: Callback::new(move |item: E| {
            let id = item.id();
            mutation.run(
                "reactivate",
                format!("{} reativado", record_label::<E>()),
                async move { crud_api::reactivate::<E>(id).await },
                || {},
            );
        }),
    };

    let close = Callback::new(move |_: ()| state.update(|s| s.close()));

    let edit_from_view = move || {
        if let Some(item) = state.with_untracked(|s| s.selected.clone()) {
            actions.edit.run(item);
        }
    };

    let save = move || {
        let editing_id = state.with_untracked(|s| s.editing_id());
        let validated = query.items.with_untracked(|items| {
            form.with_untracked(|f| E::validate(f, &ValidationContext::new(editing_id, items, today())))
        });
        let payload = match validated {
            Ok(payload) => payload,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let success = match editing_id {
            Some(_) => format!("{} atualizado com sucesso", record_label::<E>()),
            None => format!("{} criado com sucesso", record_label::<E>()),
        };
        mutation.run(
            "save",
            success,
            async move {
                match editing_id {
                    Some(id) => crud_api::update::<E>(id, &payload).await.map(drop),
                    None => crud_api::create::<E>(&payload).await.map(drop),
                }
            },
            move || state.update(|s| s.close()),
        );
    };

    let confirm_delete = move || {
        let Some(item) = state.with_untracked(|s| s.selected.clone()) else {
            return;
        };
        if item.deactivation_blocker().is_some() {
            return;
        }
        let id = item.id();
        mutation.run(
            "deactivate",
            format!("{} inativado", record_label::<E>()),
            async move { crud_api::deactivate::<E>(id).await },
            move || state.update(|s| s.close()),
        );
    };

    let is_cards = move || state.with(|s| s.view_mode == ViewMode::Cards);

    view! {
        <PageFrame page_id=page_id(E::aggregate_index(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <div class="header">
                <div class="header__content">
                    <span class="header__icon">{icon(E::icon())}</span>
                    <h1 class="header__title">{E::list_name()}</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || lists.with(|(active, _)| active.len().to_string())}
                    </Badge>
                </div>
                <div class="header__actions">
                    <SearchInput value=search placeholder=format!("Buscar {}...", E::list_name().to_lowercase()) />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| state.update(|s| s.toggle_view_mode())
                    >
                        {move || if is_cards() { icon("table") } else { icon("grid") }}
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_create()>
                        {icon("plus")}
                        {format!("Novo cadastro de {}", E::element_name().to_lowercase())}
                    </Button>
                </div>
            </div>

            {move || query.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show
                when=move || !query.loading.get() || query.items.with(|i| !i.is_empty())
                fallback=|| view! {
                    <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        <Spinner />
                        "Carregando..."
                    </Flex>
                }
            >
                {move || {
                    let (active, _) = lists.get();
                    if active.is_empty() {
                        view! { <p class="list__empty">"Nenhum registro encontrado."</p> }.into_any()
                    } else if is_cards() {
                        record_cards(active, actions, pending).into_any()
                    } else {
                        record_table(active, actions, pending).into_any()
                    }
                }}
            </Show>

            <div class="list__inactive">
                <button
                    class="button button--ghost"
                    on:click=move |_| state.update(|s| s.show_inactive = !s.show_inactive)
                >
                    {move || {
                        let count = lists.with(|(_, inactive)| inactive.len());
                        if state.with(|s| s.show_inactive) {
                            format!("Ocultar inativos ({count})")
                        } else {
                            format!("Mostrar inativos ({count})")
                        }
                    }}
                </button>
                <Show when=move || state.with(|s| s.show_inactive)>
                    {move || {
                        let (_, inactive) = lists.get();
                        record_table(inactive, actions, pending)
                    }}
                </Show>
            </div>

            <Show when=move || state.with(|s| s.is_form_open)>
                <Modal
                    title=Signal::derive(move || {
                        if state.with(|s| s.selected.is_some()) {
                            format!("Editar {}", E::element_name().to_lowercase())
                        } else {
                            format!("Novo cadastro de {}", E::element_name().to_lowercase())
                        }
                    })
                    on_close=close
                    wide=true
                >
                    <div class="form">
                        {E::form_fields(form, errors)}
                        <div class="modal-footer">
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                                "Cancelar"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=pending
                                on_click=move |_| save()
                            >
                                {move || if pending.get() { "Salvando..." } else { "Salvar" }}
                            </Button>
                        </div>
                    </div>
                </Modal>
            </Show>

            <Show when=move || state.with(|s| s.is_view_open)>
                <Modal title=E::element_name().to_string() on_close=close>
                    {move || state.with(|s| s.selected.as_ref().map(|item| view! {
                        <h3 class="detail-list__title">{item.name().to_string()}</h3>
                        {status_badge(item.is_active())}
                        <DetailList rows=item.details() />
                    }))}
                    <div class="modal-footer">
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                            "Fechar"
                        </Button>
                        <Show when=move || state.with(|s| s.selected.as_ref().is_some_and(|i| i.is_active()))>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| edit_from_view()>
                                {icon("edit")}
                                "Editar"
                            </Button>
                        </Show>
                    </div>
                </Modal>
            </Show>

            <Show when=move || state.with(|s| s.is_delete_open)>
                <Modal title=format!("Inativar {}", E::element_name().to_lowercase()) on_close=close>
                    {move || state.with(|s| s.selected.as_ref().map(|item| {
                        match item.deactivation_blocker() {
                            Some(reason) => view! {
                                <div class="warning-box warning-box--blocked">
                                    <span class="warning-box__text">{reason}</span>
                                </div>
                            }.into_any(),
                            None => view! {
                                <p>
                                    "Deseja inativar "
                                    <strong>{item.name().to_string()}</strong>
                                    "? O registro poderá ser reativado depois."
                                </p>
                            }.into_any(),
                        }
                    }))}
                    <div class="modal-footer">
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                            "Cancelar"
                        </Button>
                        <Show when=move || {
                            state.with(|s| s.selected.as_ref().is_some_and(|i| i.deactivation_blocker().is_none()))
                        }>
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=pending
                                on_click=move |_| confirm_delete()
                            >
                                {icon("delete")}
                                {move || if pending.get() { "Inativando..." } else { "Inativar" }}
                            </Button>
                        </Show>
                    </div>
                </Modal>
            </Show>
        </PageFrame>
    }
}

pub fn status_badge(active: bool) -> impl IntoView {
    let (color, label) = if active {
        (BadgeColor::Success, "Ativo")
    } else {
        (BadgeColor::Subtle, "Inativo")
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge> }
}

fn row_buttons<E: EntityUi>(item: E, actions: RowActions<E>, pending: Signal<bool>) -> impl IntoView {
    let for_view = item.clone();
    if item.is_active() {
        let for_edit = item.clone();
        view! {
            <Flex gap=FlexGap::Small>
                <button class="button button--icon" title="Visualizar" on:click=move |_| actions.view.run(for_view.clone())>
                    {icon("eye")}
                </button>
                <button class="button button--icon" title="Editar" on:click=move |_| actions.edit.run(for_edit.clone())>
                    {icon("edit")}
                </button>
                <button class="button button--icon button--danger" title="Inativar" on:click=move |_| actions.delete.run(item.clone())>
                    {icon("delete")}
                </button>
            </Flex>
        }
        .into_any()
    } else {
        view! {
            <Flex gap=FlexGap::Small>
                <button class="button button--icon" title="Visualizar" on:click=move |_| actions.view.run(for_view.clone())>
                    {icon("eye")}
                </button>
                <button
                    class="button button--secondary"
                    disabled=move || pending.get()
                    on:click=move |_| actions.reactivate.run(item.clone())
                >
                    {icon("undo")}
                    "Reativar"
                </button>
            </Flex>
        }
        .into_any()
    }
}

fn record_cards<E: EntityUi>(items: Vec<E>, actions: RowActions<E>, pending: Signal<bool>) -> impl IntoView {
    view! {
        <div class="card-grid">
            {items
                .into_iter()
                .map(|item| {
                    let style = item
                        .accent_color()
                        .map(|c| format!("border-left: 4px solid {c};"))
                        .unwrap_or_default();
                    let name = item.name().to_string();
                    let active = item.is_active();
                    let lines = item.card_lines();
                    view! {
                        <div class="card" class:card--inactive=!active style=style>
                            <div class="card__header">
                                <span class="card__icon">{icon(E::icon())}</span>
                                <span class="card__title">{name}</span>
                                {status_badge(active)}
                            </div>
                            <div class="card__body">
                                {lines
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <div class="card__line">
                                            <span class="card__label">{label}</span>
                                            <span class="card__value">{value}</span>
                                        </div>
                                    })
                                    .collect_view()}
                            </div>
                            <div class="card__actions">{row_buttons(item, actions, pending)}</div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn record_table<E: EntityUi>(items: Vec<E>, actions: RowActions<E>, pending: Signal<bool>) -> impl IntoView {
    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    {E::columns()
                        .into_iter()
                        .map(|column| view! { <TableHeaderCell resizable=true min_width=120.0>{column}</TableHeaderCell> })
                        .collect_view()}
                    <TableHeaderCell min_width=140.0>"Ações"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {items
                    .into_iter()
                    .map(|item| {
                        let cells = item.cells();
                        view! {
                            <TableRow>
                                {cells
                                    .into_iter()
                                    .map(|cell| view! {
                                        <TableCell>
                                            <TableCellLayout truncate=true>{cell}</TableCellLayout>
                                        </TableCell>
                                    })
                                    .collect_view()}
                                <TableCell>{row_buttons(item, actions, pending)}</TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view()}
            </TableBody>
        </Table>
    }
}
