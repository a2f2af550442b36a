//! Yew view components for the budget dashboard.

use crate::config::{DEFAULT_ANIMATION_MS, SEARCH_PLACEHOLDER};
use crate::dataset::ReformOption;
use crate::hooks::{use_animated_value, use_cancel_key, use_focus_on, use_outside_click};
use crate::selector::{visible_items, SelectorAction, SelectorState};
use crate::utils::MetricFormat;
use crate::{ConstituencyImpact, ConstituencyItem, DecileBreakdown, MetricsSummary};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AnimatedValueProps {
    pub value: f64,
    #[prop_or_default]
    pub format: MetricFormat,
    #[prop_or(DEFAULT_ANIMATION_MS)]
    pub duration_ms: f64,
}

/// A number that tweens to each new `value` and renders through `format`.
#[function_component(AnimatedValue)]
pub fn animated_value(props: &AnimatedValueProps) -> Html {
    let shown = use_animated_value(props.value, props.duration_ms);
    html! {
        <span class="animated-value">{ props.format.format(shown) }</span>
    }
}

#[derive(Properties, PartialEq)]
struct MetricCardProps {
    label: AttrValue,
    value: f64,
    format: MetricFormat,
}

#[function_component(MetricCard)]
fn metric_card(props: &MetricCardProps) -> Html {
    html! {
        <div class="metric-card">
            <div class="metric-label">{ props.label.clone() }</div>
            <div class="metric-value">
                <AnimatedValue value={props.value} format={props.format} />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MetricsBarProps {
    pub metrics: Option<MetricsSummary>,
}

/// The four headline figures. Renders nothing until a full summary exists.
#[function_component(MetricsBar)]
pub fn metrics_bar(props: &MetricsBarProps) -> Html {
    let Some(metrics) = props.metrics else {
        return html! {};
    };

    html! {
        <div class="metrics-bar">
            <MetricCard label="Budget impact"
                value={metrics.budget_impact}
                format={MetricFormat::Billions} />
            <MetricCard label="People affected"
                value={metrics.percent_affected}
                format={MetricFormat::Percent} />
            // Gini change arrives as a fraction.
            <MetricCard label="Inequality (Gini) change"
                value={metrics.inequality_change * 100.0}
                format={MetricFormat::SignedPercent} />
            <MetricCard label="Poverty rate change (AHC)"
                value={metrics.poverty_rate_change}
                format={MetricFormat::PercentagePoints} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConstituencySelectorProps {
    pub items: Rc<Vec<ConstituencyItem>>,
    #[prop_or_default]
    pub selected: Option<ConstituencyItem>,
    pub on_select: Callback<ConstituencyItem>,
}

/// Expandable constituency picker with a live search filter.
///
/// Selecting clears the search; dismissing (outside press or cancel key)
/// only collapses the panel.
#[function_component(ConstituencySelector)]
pub fn constituency_selector(props: &ConstituencySelectorProps) -> Html {
    let state = use_reducer(SelectorState::default);
    let root_ref = use_node_ref();
    let search_ref = use_node_ref();

    let dismiss = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(SelectorAction::Dismiss))
    };
    use_outside_click(root_ref.clone(), state.is_expanded, dismiss.clone());
    use_cancel_key(state.is_expanded, dismiss);
    use_focus_on(search_ref.clone(), state.is_expanded);

    let candidates = use_memo(
        (props.items.clone(), state.search_query.clone()),
        |(items, query)| visible_items(items, query),
    );

    let on_toggle = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(SelectorAction::Toggle))
    };

    let on_search = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(SelectorAction::SetSearchQuery(input.value()));
        })
    };

    let on_choose = {
        let dispatcher = state.dispatcher();
        let dispatch = Callback::from(move |action| dispatcher.dispatch(action));
        let on_select = props.on_select.clone();
        Callback::from(move |item| choose(item, &on_select, &dispatch))
    };

    let current = props.selected.as_ref().or(state.selected_item.as_ref());
    let label = current
        .map(|item| item.name.clone())
        .unwrap_or_else(|| "Select a constituency".to_string());

    html! {
        <div class="constituency-selector" ref={root_ref}>
            <button class="selector-toggle"
                aria-expanded={state.is_expanded.to_string()}
                onclick={on_toggle}
            >
                <span class="selector-label">{ label }</span>
                <span class="selector-chevron"></span>
            </button>

            if state.is_expanded {
                <div class="selector-panel">
                    <input
                        type="text"
                        class="selector-search"
                        ref={search_ref}
                        placeholder={SEARCH_PLACEHOLDER}
                        value={state.search_query.clone()}
                        oninput={on_search}
                    />
                    { render_options(&candidates, current, &on_choose) }
                </div>
            }
        </div>
    }
}

/// Report `item` to the page, then collapse the picker and clear its search.
fn choose(
    item: ConstituencyItem,
    on_select: &Callback<ConstituencyItem>,
    dispatch: &Callback<SelectorAction>,
) {
    on_select.emit(item.clone());
    dispatch.emit(SelectorAction::Select(item));
}

/// The option list, or the "no results" line when nothing matches.
fn render_options(
    candidates: &[ConstituencyItem],
    current: Option<&ConstituencyItem>,
    on_choose: &Callback<ConstituencyItem>,
) -> Html {
    if candidates.is_empty() {
        return html! {
            <p class="no-results-message">{ "No constituencies found" }</p>
        };
    }

    html! {
        <ul class="selector-options">
            { candidates.iter().map(|item| {
                let is_current = current.map(|c| c.code == item.code).unwrap_or(false);
                let onclick = {
                    let item = item.clone();
                    on_choose.reform(move |_: MouseEvent| item.clone())
                };
                html! {
                    <li key={item.code.clone()}>
                        <button
                            class={classes!("selector-option", is_current.then_some("selected"))}
                            {onclick}
                        >
                            { item.name.clone() }
                        </button>
                    </li>
                }
            }).collect::<Html>() }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConstituencyImpactCardProps {
    pub impact: Option<ConstituencyImpact>,
}

/// Household-level effect of the current reform in one constituency.
#[function_component(ConstituencyImpactCard)]
pub fn constituency_impact_card(props: &ConstituencyImpactCardProps) -> Html {
    let Some(impact) = props.impact.as_ref() else {
        return html! {};
    };

    html! {
        <div class="constituency-impact">
            <h3>{ impact.constituency_name.clone() }</h3>
            <div class="impact-row">
                <span class="impact-label">{ "Average household gain (per year)" }</span>
                <AnimatedValue value={impact.average_gain} format={MetricFormat::SignedPounds} />
            </div>
            <div class="impact-row">
                <span class="impact-label">{ "Relative change in net income" }</span>
                <AnimatedValue value={impact.relative_change} format={MetricFormat::SignedPercent} />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DecileBreakdownChartProps {
    pub breakdown: Option<DecileBreakdown>,
}

/// Relative and average £ change for each income decile, poorest first.
#[function_component(DecileBreakdownChart)]
pub fn decile_breakdown_chart(props: &DecileBreakdownChartProps) -> Html {
    let Some(breakdown) = props.breakdown.as_ref() else {
        return html! {};
    };

    html! {
        <div class="decile-breakdown">
            <h3>{ "Impact by income decile" }</h3>
            <table class="decile-table">
                <thead>
                    <tr>
                        <th>{ "Decile" }</th>
                        <th>{ "Change in net income" }</th>
                        <th>{ "Average change per household" }</th>
                    </tr>
                </thead>
                <tbody>
                    { breakdown.deciles.iter().map(|entry| html! {
                        <tr key={entry.decile.to_string()} class="decile-row">
                            <td>{ entry.decile.to_string() }</td>
                            <td>
                                <AnimatedValue value={entry.relative_change}
                                    format={MetricFormat::SignedPercent} />
                            </td>
                            <td>
                                if let Some(average) = entry.average_change {
                                    <AnimatedValue value={average}
                                        format={MetricFormat::SignedPounds} />
                                }
                            </td>
                        </tr>
                    }).collect::<Html>() }
                </tbody>
            </table>
            if let Some(overall) = breakdown.overall_average_change {
                <p class="decile-overall">
                    { "All households: " }
                    <AnimatedValue value={overall} format={MetricFormat::SignedPounds} />
                </p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ReformTabsProps {
    pub reforms: Rc<Vec<ReformOption>>,
    pub selected: AttrValue,
    pub on_change: Callback<String>,
}

#[function_component(ReformTabs)]
pub fn reform_tabs(props: &ReformTabsProps) -> Html {
    html! {
        <div class="reform-tabs">
            { props.reforms.iter().map(|reform| {
                let active = reform.id == props.selected.as_str();
                let onclick = {
                    let id = reform.id.clone();
                    props.on_change.reform(move |_: MouseEvent| id.clone())
                };
                html! {
                    <button key={reform.id.clone()}
                        class={classes!("tab", active.then_some("active"))}
                        {onclick}
                    >
                        { reform.name.clone() }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct YearTabsProps {
    pub years: Vec<u16>,
    pub selected: u16,
    pub on_change: Callback<u16>,
}

#[function_component(YearTabs)]
pub fn year_tabs(props: &YearTabsProps) -> Html {
    html! {
        <div class="year-tabs">
            { props.years.iter().map(|&year| {
                let onclick = props.on_change.reform(move |_: MouseEvent| year);
                html! {
                    <button key={year.to_string()}
                        class={classes!("tab", (year == props.selected).then_some("active"))}
                        {onclick}
                    >
                        { format!("{}-{:02}", year, (year + 1) % 100) }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}
