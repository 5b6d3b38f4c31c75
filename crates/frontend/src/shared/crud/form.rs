//! Building blocks for entity forms.

use contracts::domain::common::{RecordId, Resource};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::masked_input::MaskedInput;
use crate::shared::query_cache::ListQuery;

/// Label, input and the inline error for `field`.
#[component]
pub fn FormField(
    label: &'static str,
    field: &'static str,
    errors: RwSignal<FieldErrors>,
    #[prop(optional)] required: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--invalid=move || errors.with(|e| e.contains(field))>
            <label class="form__label">
                {label}
                {required.then_some(view! { <span class="form__required">" *"</span> })}
            </label>
            {children()}
            {move || {
                errors.with(|e| e.get(field).map(str::to_string)).map(|message| view! {
                    <span class="form__error">{message}</span>
                })
            }}
        </div>
    }
}

/// `<input>` bound to a getter and a setter.
pub fn text_input(
    value: Signal<String>,
    on_change: impl Fn(String) + 'static,
    kind: &'static str,
) -> impl IntoView {
    view! {
        <input
            class="form__input"
            type=kind
            prop:value=move || value.get()
            on:input=move |ev| on_change(event_target_value(&ev))
        />
    }
}

pub fn textarea_input(value: Signal<String>, on_change: impl Fn(String) + 'static) -> impl IntoView {
    view! {
        <textarea
            class="form__textarea"
            rows="3"
            prop:value=move || value.get()
            on:input=move |ev| on_change(event_target_value(&ev))
        />
    }
}

/// `<select>` over (id, label) options with an empty "Selecione..." entry.
pub fn entity_select(
    options: Signal<Vec<(RecordId, String)>>,
    selected: Signal<Option<RecordId>>,
    on_change: impl Fn(Option<RecordId>) + 'static,
) -> impl IntoView {
    view! {
        <select
            class="form__select"
            prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
            on:change=move |ev| on_change(event_target_value(&ev).parse::<RecordId>().ok())
        >
            <option value="">"Selecione..."</option>
            {move || {
                let current = selected.get();
                options
                    .get()
                    .into_iter()
                    .map(|(id, label)| {
                        view! {
                            <option value=id.to_string() selected=current == Some(id)>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}

/// [`text_input`] bound to one field of a form signal.
pub fn form_text<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
    kind: &'static str,
) -> impl IntoView {
    text_input(
        Signal::derive(move || form.with(get)),
        move |value| form.update(|f| set(f, value)),
        kind,
    )
}

pub fn form_textarea<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView {
    textarea_input(
        Signal::derive(move || form.with(get)),
        move |value| form.update(|f| set(f, value)),
    )
}

pub fn form_masked<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
    mask: fn(&str) -> String,
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <MaskedInput
            value=Signal::derive(move || form.with(get))
            on_change=Callback::new(move |value| form.update(|f| set(f, value)))
            mask=mask
            placeholder=placeholder
        />
    }
}

pub fn form_select<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    options: Signal<Vec<(RecordId, String)>>,
    get: fn(&F) -> Option<RecordId>,
    set: fn(&mut F, Option<RecordId>),
) -> impl IntoView {
    entity_select(
        options,
        Signal::derive(move || form.with(get)),
        move |id| form.update(|f| set(f, id)),
    )
}

/// Active records of `E` as select options, sorted by name.
pub fn active_options<E: Resource>() -> Signal<Vec<(RecordId, String)>> {
    let query = ListQuery::<E>::of();
    Signal::derive(move || {
        let mut options: Vec<_> = query
            .active()
            .into_iter()
            .map(|e| (e.id(), e.name().to_string()))
            .collect();
        options.sort_by_key(|(_, name)| name.to_lowercase());
        options
    })
}

/// Read-only label/value rows used by the view dialogs.
#[component]
pub fn DetailList(rows: Vec<(&'static str, String)>) -> impl IntoView {
    view! {
        <dl class="detail-list">
            {rows
                .into_iter()
                .map(|(label, value)| {
                    let value = if value.trim().is_empty() { "-".to_string() } else { value };
                    view! {
                        <dt class="detail-list__label">{label}</dt>
                        <dd class="detail-list__value">{value}</dd>
                    }
                })
                .collect_view()}
        </dl>
    }
}
