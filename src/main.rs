//! Scottish budget dashboard: reform metrics and constituency impacts.
//! Wires the dataset, page state and components together.

use budget_dashboard::{
    components::{
        ConstituencyImpactCard, ConstituencySelector, DecileBreakdownChart, MetricsBar, ReformTabs,
        YearTabs,
    },
    config::{DEFAULT_REFORM_ID, DEFAULT_YEAR},
    dataset::EMBEDDED,
    ConstituencyItem,
};
use log::{debug, info};
use std::rc::Rc;
use yew::prelude::*;

/// Page component holding the reform, year and constituency selections.
#[function_component(App)]
fn app() -> Html {
    let data = &*EMBEDDED;
    let reforms = use_memo((), |_| data.reforms());
    let constituencies = use_memo((), |_| data.constituencies.clone());

    let reform_id = use_state(|| DEFAULT_REFORM_ID.to_string());
    let year = use_state(|| DEFAULT_YEAR);
    let selected = use_state(|| None::<ConstituencyItem>);

    let on_reform_change = {
        let reform_id = reform_id.clone();
        let year = year.clone();
        Callback::from(move |id: String| {
            // Keep the year if the new reform has figures for it.
            let years = data.years(&id);
            if !years.contains(&*year) {
                if let Some(&first) = years.first() {
                    year.set(first);
                }
            }
            reform_id.set(id);
        })
    };

    let on_year_change = {
        let year = year.clone();
        Callback::from(move |y: u16| year.set(y))
    };

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |item: ConstituencyItem| {
            info!("Selected constituency {} ({})", item.name, item.code);
            selected.set(Some(item));
        })
    };

    let metrics = data.summary(&reform_id, *year);
    let breakdown = data.deciles(&reform_id, *year);

    use_effect_with(((*reform_id).clone(), *year), move |(reform_id, year)| {
        if let Some(summary) = metrics {
            debug!("Metrics for {} {}: {}", reform_id, year, summary.to_json());
        }
    });

    let impact = (*selected)
        .as_ref()
        .and_then(|item| data.impact(&reform_id, *year, &item.code));

    html! {
        <div class="container">
            <header class="dashboard-header">
                <h1>{ "Scottish Budget: policy impact" }</h1>
            </header>

            <section class="controls">
                <ReformTabs
                    reforms={Rc::clone(&reforms)}
                    selected={(*reform_id).clone()}
                    on_change={on_reform_change}
                />
                <YearTabs
                    years={data.years(&reform_id)}
                    selected={*year}
                    on_change={on_year_change}
                />
            </section>

            <section class="metrics-section">
                <MetricsBar {metrics} />
            </section>

            <section class="decile-section">
                <DecileBreakdownChart {breakdown} />
            </section>

            <section class="constituency-section">
                <h2>{ "Impact by constituency" }</h2>
                <ConstituencySelector
                    items={Rc::clone(&constituencies)}
                    selected={(*selected).clone()}
                    {on_select}
                />
                <ConstituencyImpactCard {impact} />
            </section>
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the page.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
