use contracts::shared::catalogue::FacetGroup;
use leptos::prelude::*;

/// Список вариантов одного фасета с флажками; внутри фасета выбор работает как ИЛИ
#[component]
pub fn FacetSelect(
    group: FacetGroup,
    /// Выбран ли вариант `value` этого фасета
    #[prop(into)]
    is_selected: Callback<String, bool>,
    /// Переключить вариант `value`
    on_toggle: Callback<String>,
) -> impl IntoView {
    let FacetGroup { id, label, options } = group;

    view! {
        <fieldset class="facet-select" data-facet=id>
            <legend class="facet-select__label">{label}</legend>
            {options
                .into_iter()
                .map(|option| {
                    let value = option.value.clone();
                    let toggle_value = option.value.clone();
                    view! {
                        <label class="facet-select__option">
                            <input
                                type="checkbox"
                                prop:checked=move || is_selected.run(value.clone())
                                on:change=move |_| on_toggle.run(toggle_value.clone())
                            />
                            <span>{option.label}</span>
                            <span class="facet-select__count">{option.count}</span>
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}
