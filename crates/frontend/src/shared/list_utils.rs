/// Утилиты для списков каталога (подсветка, поиск с debounce, индикатор сортировки)
use contracts::shared::catalogue::SortSpec;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Разбить текст на куски `(фрагмент, совпадает)` по поисковой строке (case-insensitive).
///
/// Текст и запрос приводятся к нижнему регистру одинаково, посимвольно с
/// полным раскрытием (`İ` даёт два символа). Совпадение засчитывается,
/// только если оно начинается и заканчивается на границе исходного символа.
pub fn split_matches<'a>(text: &'a str, filter: &str) -> Vec<(&'a str, bool)> {
    if filter.trim().is_empty() {
        return vec![(text, false)];
    }
    let needle: Vec<char> = filter.chars().flat_map(char::to_lowercase).collect();

    // строчные символы и байтовое смещение исходного символа для каждого
    let mut lowered: Vec<char> = Vec::new();
    let mut origins: Vec<usize> = Vec::new();
    for (pos, c) in text.char_indices() {
        for lower in c.to_lowercase() {
            lowered.push(lower);
            origins.push(pos);
        }
    }

    let on_boundary = |i: usize| i == 0 || i == origins.len() || origins[i] != origins[i - 1];
    let offset = |i: usize| origins.get(i).copied().unwrap_or(text.len());

    let mut parts = Vec::new();
    let mut last = 0usize;
    let mut i = 0usize;
    while i + needle.len() <= lowered.len() {
        let end = i + needle.len();
        if on_boundary(i) && on_boundary(end) && lowered[i..end] == needle[..] {
            let start = offset(i);
            let stop = offset(end);
            if start > last {
                parts.push((&text[last..start], false));
            }
            parts.push((&text[start..stop], true));
            last = stop;
            i = end;
        } else {
            i += 1;
        }
    }
    if last < text.len() {
        parts.push((&text[last..], false));
    }
    parts
}

/// Подсветка совпадений в тексте
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let parts: Vec<AnyView> = split_matches(text, filter)
        .into_iter()
        .map(|(fragment, matched)| {
            let fragment = fragment.to_string();
            if matched {
                view! { <mark class="search-match">{fragment}</mark> }.into_any()
            } else {
                view! { <span>{fragment}</span> }.into_any()
            }
        })
        .collect();

    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };

        // Отменяем предыдущий таймер если есть
        if let Some(timeout_id) = debounce_timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let closure = wasm_bindgen::closure::Closure::once_into_js(move || {
            on_change.run(new_value);
        });

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref::<js_sys::Function>(),
            300,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(e) => log::warn!("setTimeout failed: {:?}", e),
        }
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        if let (Some(window), Some(timeout_id)) = (web_sys::window(), debounce_timeout.get_value()) {
            window.clear_timeout_with_handle(timeout_id);
        }
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder={placeholder}
                class=move || if is_filter_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button class="search-input__clear" on:click=clear_filter title="Clear">
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(sort: Option<&SortSpec>, field: &str) -> &'static str {
    match sort {
        Some(spec) if spec.field == field => {
            if spec.ascending {
                " ▲"
            } else {
                " ▼"
            }
        }
        _ => " ⇅",
    }
}

/// Следующая сортировка после клика по заголовку
pub fn next_sort(current: Option<&SortSpec>, field: &str) -> SortSpec {
    match current {
        Some(spec) => spec.toggled(field),
        None => SortSpec::asc(field),
    }
}
