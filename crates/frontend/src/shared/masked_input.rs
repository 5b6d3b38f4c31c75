use contracts::shared::masks::caret_after_mask;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

/// Text input that re-masks on every keystroke and keeps the caret after the
/// same digit it followed before masking.
#[component]
pub fn MaskedInput(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    mask: fn(&str) -> String,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] id: &'static str,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let on_input = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let raw = input.value();
        let caret = input
            .selection_start()
            .ok()
            .flatten()
            .map(|c| c as usize)
            .unwrap_or(raw.chars().count());
        let masked = mask(&raw);
        if masked != raw {
            input.set_value(&masked);
            let pos = caret_after_mask(&raw, caret, &masked) as u32;
            let _ = input.set_selection_range(pos, pos);
        }
        on_change.run(masked);
    };

    view! {
        <input
            class="form__input"
            type="text"
            inputmode="numeric"
            id=id
            placeholder=placeholder
            prop:value=move || value.get()
            disabled=move || disabled.get()
            on:input=on_input
        />
    }
}
