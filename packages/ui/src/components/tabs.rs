use dioxus::prelude::*;
use dioxus_primitives::tabs as primitive;

/// A row of tab triggers. `tabs` holds `(value, label)` pairs.
#[component]
pub fn TabList(
    tabs: Vec<(String, String)>,
    active: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        primitive::Tabs {
            class: "tabs",
            value: Some(active),
            on_value_change: move |value: String| on_select.call(value),
            primitive::TabList {
                class: "tab-list",
                for (index, (value, label)) in tabs.into_iter().enumerate() {
                    primitive::TabTrigger {
                        key: "{value}",
                        class: "tab-trigger",
                        value: value,
                        index: index,
                        "{label}"
                    }
                }
            }
        }
    }
}
