use contracts::domain::a005_client::aggregate::Client;
use contracts::domain::a006_employee::aggregate::Employee;
use contracts::domain::a007_appointment::aggregate::{Appointment, AppointmentAction, AppointmentForm};
use contracts::domain::a007_appointment::reminders::{format_reminder, REMINDER_PRESETS};
use leptos::prelude::*;
use thaw::*;

use super::view_model::{AppointmentDetailsVm, DialogMode};
use crate::shared::crud::form::{active_options, form_select, form_text, form_textarea, DetailList, FormField};
use crate::shared::date_utils::format_naive_datetime;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;

fn detail_rows(a: &Appointment) -> Vec<(&'static str, String)> {
    let employees = a
        .employees
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let reminders = a
        .reminders
        .iter()
        .map(|m| format_reminder(*m))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        ("Cliente", a.client.name.clone()),
        ("Registrado por", a.registered_by.name.clone()),
        ("Início", format_naive_datetime(a.start)),
        ("Fim", a.end.map(format_naive_datetime).unwrap_or_default()),
        ("Status", a.status.label().to_string()),
        ("Colaboradores", employees),
        ("Lembretes", reminders),
        ("Descrição", a.description.clone().unwrap_or_default()),
    ]
}

pub fn status_color(a: &Appointment) -> BadgeColor {
    if a.is_done() {
        BadgeColor::Success
    } else {
        BadgeColor::Informative
    }
}

/// Lifecycle button, disabled with the reason as tooltip when not allowed.
fn action_button(
    vm: AppointmentDetailsVm,
    action: AppointmentAction,
    label: &'static str,
    icon_name: &'static str,
    run: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    let blocked = move || {
        vm.mode
            .with(|m| m.appointment().map(|a| a.check(action).err().map(|e| e.to_string())))
            .flatten()
    };
    let pending = vm.mutation.is_pending();
    view! {
        <span title=move || blocked().unwrap_or_default()>
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || pending.get() || blocked().is_some())
                on_click=move |_| run()
            >
                {icon(icon_name)}
                {label}
            </Button>
        </span>
    }
}

fn view_body(vm: AppointmentDetailsVm) -> impl IntoView {
    view! {
        {move || vm.mode.with(|m| m.appointment().map(|a| {
            let color = status_color(a);
            let status_label = a.status.label();
            view! {
                <div class="appointment__status">
                    <Badge appearance=BadgeAppearance::Tint color=color>
                        {status_label}
                    </Badge>
                </div>
                <DetailList rows=detail_rows(a) />
            }
        }))}
        <Show when=move || vm.confirm_delete.get()>
            <div class="warning-box">
                <span class="warning-box__text">"Excluir este atendimento? Esta ação não pode ser desfeita."</span>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.confirm_delete.set(false)>
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=vm.mutation.is_pending()
                    on_click=move |_| vm.delete()
                >
                    "Confirmar exclusão"
                </Button>
            </div>
        </Show>
        <div class="modal-footer">
            {action_button(vm, AppointmentAction::Delete, "Excluir", "delete", move || vm.confirm_delete.set(true))}
            {action_button(vm, AppointmentAction::UnmarkDone, "Voltar para agendado", "undo", move || vm.unmark_done())}
            {action_button(vm, AppointmentAction::MarkDone, "Marcar como realizado", "check", move || vm.mark_done())}
            {action_button(vm, AppointmentAction::Edit, "Editar", "edit", move || vm.edit())}
        </div>
    }
}

fn employee_checklist(vm: AppointmentDetailsVm) -> impl IntoView {
    let employees = active_options::<Employee>();
    let form = vm.form;
    move || {
        employees
            .get()
            .into_iter()
            .map(|(id, name)| {
                view! {
                    <label class="checklist__item">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.employee_ids.contains(&id))
                            on:change=move |_| form.update(|f| f.toggle_employee(id))
                        />
                        {name}
                    </label>
                }
            })
            .collect_view()
    }
}

fn reminder_toggles(form: RwSignal<AppointmentForm>) -> impl IntoView {
    REMINDER_PRESETS
        .iter()
        .map(|&minutes| {
            view! {
                <button
                    type="button"
                    class="chip"
                    class:chip--selected=move || form.with(|f| f.reminders.contains(&minutes))
                    on:click=move |_| form.update(|f| f.toggle_reminder(minutes))
                >
                    {format_reminder(minutes)}
                </button>
            }
        })
        .collect_view()
}

fn form_body(vm: AppointmentDetailsVm) -> impl IntoView {
    let form = vm.form;
    let errors = vm.errors;
    let pending = vm.mutation.is_pending();
    let clients = active_options::<Client>();
    let employees = active_options::<Employee>();

    view! {
        <div class="form">
            <FormField label="Título" field="titulo" errors=errors required=true>
                {form_text(form, |f| f.title.clone(), |f, v| f.title = v, "text")}
            </FormField>
            <div class="form__row">
                <FormField label="Cliente" field="cliente" errors=errors required=true>
                    {form_select(form, clients, |f| f.client_id, |f, v| f.client_id = v)}
                </FormField>
                <FormField label="Registrado por" field="registradoPor" errors=errors required=true>
                    {form_select(form, employees, |f| f.registered_by_id, |f, v| f.registered_by_id = v)}
                </FormField>
            </div>
            <div class="form__row">
                <FormField label="Início" field="dataInicio" errors=errors required=true>
                    {form_text(form, |f| f.start.clone(), |f, v| f.start = v, "datetime-local")}
                </FormField>
                <FormField label="Fim" field="dataFim" errors=errors>
                    {form_text(form, |f| f.end.clone(), |f, v| f.end = v, "datetime-local")}
                </FormField>
            </div>
            <FormField label="Colaboradores" field="colaboradores" errors=errors required=true>
                <div class="checklist">{employee_checklist(vm)}</div>
            </FormField>
            <div class="form__group">
                <label class="form__label">"Lembretes"</label>
                <div class="chips">{reminder_toggles(form)}</div>
            </div>
            <FormField label="Descrição" field="descricao" errors=errors>
                {form_textarea(form, |f| f.description.clone(), |f, v| f.description = v)}
            </FormField>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.close()>
                    "Cancelar"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=pending on_click=move |_| vm.save()>
                    {move || if pending.get() { "Salvando..." } else { "Salvar" }}
                </Button>
            </div>
        </div>
    }
}

/// View, create and edit dialog for one appointment.
#[component]
pub fn AppointmentDialog(vm: AppointmentDetailsVm) -> impl IntoView {
    let is_form = Memo::new(move |_| vm.mode.with(DialogMode::is_form));

    view! {
        <Show when=move || vm.mode.with(DialogMode::is_open)>
            <Modal
                title=Signal::derive(move || vm.mode.with(DialogMode::title))
                on_close=Callback::new(move |_| vm.close())
                wide=true
            >
                {move || if is_form.get() {
                    form_body(vm).into_any()
                } else {
                    view_body(vm).into_any()
                }}
            </Modal>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use contracts::domain::a007_appointment::aggregate::AppointmentStatus;
    use contracts::domain::common::EntityRef;

    #[test]
    fn test_detail_rows() {
        let start = NaiveDateTime::parse_from_str("2024-06-12 14:00", "%Y-%m-%d %H:%M").unwrap();
        let appointment = Appointment {
            id: 1,
            title: "Visita técnica".into(),
            description: None,
            client: EntityRef { id: 3, name: "Maria Souza".into() },
            registered_by: EntityRef { id: 7, name: "João Lima".into() },
            start,
            end: None,
            status: AppointmentStatus::Done,
            active: true,
            employees: vec![
                EntityRef { id: 7, name: "João Lima".into() },
                EntityRef { id: 8, name: "Ana Reis".into() },
            ],
            reminders: vec![],
        };
        let rows = detail_rows(&appointment);
        assert_eq!(rows[0], ("Cliente", "Maria Souza".to_string()));
        assert_eq!(rows[2], ("Início", "12/06/2024 14:00".to_string()));
        assert_eq!(rows[3], ("Fim", String::new()));
        assert_eq!(rows[4], ("Status", "Realizado".to_string()));
        assert_eq!(rows[5], ("Colaboradores", "João Lima, Ana Reis".to_string()));
    }
}
