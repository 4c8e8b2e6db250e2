//! Vertical timeline whose entries reveal as they scroll into view.

use crate::app::scroll::{ThrottledScroll, viewport_height, viewport_rect};
use crate::core::nav::{is_revealed, timeline_fill_height};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;

const ENTRIES: usize = 3;

#[derive(Properties, PartialEq)]
pub(crate) struct RevealTimelineProps {
    pub throttle_ms: u32,
    pub threshold: f64,
}

#[function_component(RevealTimeline)]
pub(crate) fn reveal_timeline(props: &RevealTimelineProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let container = use_node_ref();
    let entries = use_memo(
        |_| (0..ENTRIES).map(|_| NodeRef::default()).collect::<Vec<_>>(),
        (),
    );
    let revealed = use_state_eq(|| vec![false; ENTRIES]);
    let fill = use_state_eq(|| 0.0f64);
    {
        let container = container.clone();
        let entries = Rc::clone(&entries);
        let revealed = revealed.clone();
        let fill = fill.clone();
        use_effect_with_deps(
            move |(throttle_ms, threshold)| {
                let threshold = *threshold;
                let update: Rc<dyn Fn()> = Rc::new(move || {
                    let viewport = viewport_height();
                    revealed.set(
                        entries
                            .iter()
                            .map(|node| {
                                node.cast::<Element>().is_some_and(|element| {
                                    let (top, bottom) = viewport_rect(&element);
                                    is_revealed(top, bottom, viewport, threshold)
                                })
                            })
                            .collect(),
                    );
                    if let Some(element) = container.cast::<Element>() {
                        fill.set(timeline_fill_height(viewport_rect(&element).1, viewport));
                    }
                });
                update();
                let subscription = ThrottledScroll::new(*throttle_ms, update);
                move || drop(subscription)
            },
            (props.throttle_ms, props.threshold),
        );
    }

    html! {
        <div id="vertical-scrollable-timeline" class="timeline" ref={container}>
            <h2 class="section-title">{bundle.text("timeline.title")}</h2>
            <div class="list-progress">
                <div class="inner" style={format!("height: {}px", *fill)} />
            </div>
            <ul>
                {for entries.iter().enumerate().map(|(index, node)| {
                    let step = index + 1;
                    let active = revealed.get(index).copied().unwrap_or(false);
                    html! {
                        <li ref={node.clone()} class={classes!("timeline-entry", active.then_some("active"))}>
                            <h3>{bundle.text(&format!("timeline.{step}.title"))}</h3>
                            <p>{bundle.text(&format!("timeline.{step}.desc"))}</p>
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}
