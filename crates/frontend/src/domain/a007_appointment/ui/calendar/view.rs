use contracts::domain::a007_appointment::aggregate::Appointment;
use contracts::domain::a007_appointment::schedule::DayBucket;
use leptos::prelude::*;
use thaw::*;

use super::super::details::{status_color, AppointmentDialog};
use super::view_model::{time_label, CalendarVm};
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::page_frame::{page_id, PageFrame, PAGE_CAT_DASHBOARD};

fn appointment_card(vm: CalendarVm, appointment: Appointment, bucket: &DayBucket) -> impl IntoView {
    let time = time_label(&appointment, bucket.day.date);
    let done = appointment.is_done();
    let title = appointment.title.clone();
    let client = appointment.client.name.clone();
    let status = appointment.status.label();
    let color = status_color(&appointment);
    view! {
        <div
            class="calendar__card"
            class:calendar__card--done=done
            on:click=move |_| vm.open(appointment.clone())
        >
            <div class="calendar__card-time">{time}</div>
            <div class="calendar__card-title">{title}</div>
            <div class="calendar__card-client">{client}</div>
            <Badge appearance=BadgeAppearance::Tint color=color>
                {status}
            </Badge>
        </div>
    }
}

fn day_column(vm: CalendarVm, bucket: DayBucket) -> impl IntoView {
    let date = bucket.day.date;
    let is_today = date == today();
    let cards = if bucket.appointments.is_empty() {
        view! { <p class="calendar__empty">"Sem atendimentos"</p> }.into_any()
    } else {
        bucket
            .appointments
            .iter()
            .cloned()
            .map(|a| appointment_card(vm, a, &bucket))
            .collect_view()
            .into_any()
    };
    view! {
        <div class="calendar__day" class:calendar__day--today=is_today>
            <div class="calendar__day-header">
                <span class="calendar__day-label">{bucket.day.label()}</span>
                <button
                    class="button button--icon"
                    title="Novo atendimento neste dia"
                    on:click=move |_| vm.create_on(date)
                >
                    {icon("plus")}
                </button>
            </div>
            <div class="calendar__day-body">{cards}</div>
        </div>
    }
}

/// Weekly calendar of appointments with status counters.
#[component]
pub fn AppointmentsCalendar() -> impl IntoView {
    let vm = CalendarVm::new();
    let loading = vm.appointments.loading;
    let error = vm.appointments.error;

    view! {
        <PageFrame page_id=page_id("a007_appointment", PAGE_CAT_DASHBOARD) category=PAGE_CAT_DASHBOARD>
            <div class="header">
                <div class="header__content">
                    {icon("calendar")}
                    <h1 class="header__title">"Atendimentos"</h1>
                    <span class="calendar__week-label">{move || vm.week.get().label()}</span>
                </div>
                <div class="header__actions">
                    <Flex gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.previous()>
                            {icon("chevron-left")}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || vm.is_current())
                            on_click=move |_| vm.current()
                        >
                            "Hoje"
                        </Button>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.next()>
                            {icon("chevron-right")}
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.create_on(today())>
                            {icon("plus")}
                            "Novo atendimento"
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="calendar__summary">
                {move || {
                    let summary = vm.summary();
                    view! {
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                            {format!("Agendados: {}", summary.scheduled)}
                        </Badge>
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                            {format!("Realizados: {}", summary.done)}
                        </Badge>
                    }
                }}
                <Show when=move || loading.get()>
                    <Spinner />
                </Show>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="calendar__grid">
                {move || vm.buckets().into_iter().map(|b| day_column(vm, b)).collect_view()}
            </div>

            <AppointmentDialog vm=vm.details />
        </PageFrame>
    }
}
