use contracts::domain::a005_client::aggregate::Client;
use contracts::domain::a007_appointment::aggregate::Appointment;
use contracts::domain::common::Resource;
use leptos::prelude::*;
use thaw::*;

use super::model::{apply, build_csv, ActiveFilter, ReportColumn, ReportFilters, ReportLayout, StatusFilter};
use crate::domain::a007_appointment::ui::model::list_range;
use crate::shared::config::company_footer;
use crate::shared::crud::form::{active_options, entity_select, text_input};
use crate::shared::date_utils::{format_naive_datetime, now_local, to_input_date, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::get_sort_indicator;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::{page_id, PageFrame, PAGE_CAT_DASHBOARD};
use crate::shared::query_cache::ListQuery;

fn filter_bar(filters: RwSignal<ReportFilters>) -> impl IntoView {
    let clients = active_options::<Client>();
    view! {
        <div class="filter-panel">
            <div class="form__group">
                <label class="form__label">"De"</label>
                {text_input(
                    Signal::derive(move || filters.with(|f| f.from.clone())),
                    move |v| filters.update(|f| f.from = v),
                    "date",
                )}
            </div>
            <div class="form__group">
                <label class="form__label">"Até"</label>
                {text_input(
                    Signal::derive(move || filters.with(|f| f.to.clone())),
                    move |v| filters.update(|f| f.to = v),
                    "date",
                )}
            </div>
            <div class="form__group">
                <label class="form__label">"Status"</label>
                <select
                    class="form__select"
                    prop:value=move || filters.with(|f| f.status.code())
                    on:change=move |ev| {
                        let status = StatusFilter::from_code(&event_target_value(&ev));
                        filters.update(|f| f.status = status);
                    }
                >
                    <option value="">"Todos"</option>
                    <option value="AGENDADO">"Agendado"</option>
                    <option value="REALIZADO">"Realizado"</option>
                </select>
            </div>
            <div class="form__group">
                <label class="form__label">"Cliente"</label>
                {entity_select(
                    clients,
                    Signal::derive(move || filters.with(|f| f.client_id)),
                    move |id| filters.update(|f| f.client_id = id),
                )}
            </div>
            <div class="form__group">
                <label class="form__label">"Situação"</label>
                <select
                    class="form__select"
                    prop:value=move || filters.with(|f| f.active.code())
                    on:change=move |ev| {
                        let active = ActiveFilter::from_code(&event_target_value(&ev));
                        filters.update(|f| f.active = active);
                    }
                >
                    <option value="ativos">"Ativos"</option>
                    <option value="inativos">"Inativos"</option>
                    <option value="todos">"Todos"</option>
                </select>
            </div>
        </div>
    }
}

fn column_picker(layout: RwSignal<ReportLayout>) -> impl IntoView {
    view! {
        <div class="column-picker">
            <span class="column-picker__label">"Colunas:"</span>
            {ReportColumn::ALL
                .into_iter()
                .map(|column| view! {
                    <label class="checklist__item">
                        <input
                            type="checkbox"
                            prop:checked=move || layout.with(|l| l.is_selected(column))
                            on:change=move |_| layout.update(|l| l.toggle_column(column))
                        />
                        {column.label()}
                    </label>
                })
                .collect_view()}
        </div>
    }
}

fn report_table(rows: Signal<Vec<Appointment>>, layout: RwSignal<ReportLayout>) -> impl IntoView {
    let columns = Memo::new(move |_| layout.with(|l| l.columns.clone()));
    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    {move || columns.get().into_iter().map(|column| view! {
                        <TableHeaderCell resizable=true min_width=120.0>
                            <div
                                class="table__sortable-header"
                                on:click=move |_| layout.update(|l| l.toggle_sort(column))
                            >
                                {column.label()}
                                <span class="table__sort-indicator">
                                    {move || layout.with(|l| get_sort_indicator(&l.sort_field, column.key(), l.sort_ascending))}
                                </span>
                            </div>
                        </TableHeaderCell>
                    }).collect_view()}
                </TableRow>
            </TableHeader>
            <TableBody>
                {move || {
                    let columns = columns.get();
                    rows.get()
                        .into_iter()
                        .map(|a| {
                            let cells = columns
                                .iter()
                                .map(|c| {
                                    let value = c.value(&a);
                                    view! {
                                        <TableCell>
                                            <TableCellLayout truncate=true>{value}</TableCellLayout>
                                        </TableCell>
                                    }
                                })
                                .collect_view();
                            view! { <TableRow>{cells}</TableRow> }
                        })
                        .collect_view()
                }}
            </TableBody>
        </Table>
    }
}

/// Filterable appointment list with CSV export.
#[component]
pub fn AppointmentReportPage() -> impl IntoView {
    let notifier = use_notifier();
    let filters = RwSignal::new(ReportFilters::for_month_of(today()));
    let layout = RwSignal::new(ReportLayout::default());
    let clients = active_options::<Client>();

    let range = Memo::new(move |_| filters.with(ReportFilters::query));
    let query = ListQuery::watch(Appointment::collection_name(), move || {
        let range = range.get();
        async move {
            match range {
                Ok(q) => list_range(&q).await,
                Err(_) => Ok(Vec::new()),
            }
        }
    });

    let rows = Signal::derive(move || {
        filters.with(|f| layout.with(|l| query.items.with(|items| apply(items, f, l))))
    });

    let export = move || {
        let client_name = filters.with_untracked(|f| {
            f.client_id.and_then(|id| {
                clients
                    .get_untracked()
                    .into_iter()
                    .find(|(cid, _)| *cid == id)
                    .map(|(_, name)| name)
            })
        });
        let summary = filters.with_untracked(|f| f.summary(client_name.as_deref()));
        let report = layout.with_untracked(|l| {
            build_csv(
                &rows.get_untracked(),
                l,
                summary,
                format_naive_datetime(now_local()),
                company_footer(),
            )
        });
        let filename = format!("relatorio-atendimentos-{}.csv", to_input_date(today()));
        match report.download(&filename) {
            Ok(()) => notifier.success("Relatório exportado"),
            Err(e) => {
                log::error!("Report export failed: {e}");
                notifier.error(e);
            }
        }
    };

    view! {
        <PageFrame page_id=page_id("r001_appointment_report", PAGE_CAT_DASHBOARD) category=PAGE_CAT_DASHBOARD>
            <div class="header">
                <div class="header__content">
                    {icon("file-text")}
                    <h1 class="header__title">"Relatório de Atendimentos"</h1>
                    <Badge appearance=BadgeAppearance::Tint>
                        {move || rows.with(|r| r.len()).to_string()}
                    </Badge>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| export()>
                        {icon("download")}
                        "Exportar CSV"
                    </Button>
                </div>
            </div>

            {filter_bar(filters)}
            {move || range.get().err().map(|e| view! { <span class="form__error">{e}</span> })}
            {move || query.error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            {column_picker(layout)}

            <Show when=move || !query.loading.get() fallback=|| view! { <Spinner /> }>
                <Show
                    when=move || rows.with(|r| !r.is_empty())
                    fallback=|| view! { <p class="list__empty">"Nenhum atendimento no período."</p> }
                >
                    {report_table(rows, layout)}
                </Show>
            </Show>
        </PageFrame>
    }
}
