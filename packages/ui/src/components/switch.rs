use dioxus::prelude::*;
use dioxus_primitives::switch;

/// Two-state toggle. The caller owns `checked`; clicks only emit `on_toggle`.
#[component]
pub fn Switch(
    checked: bool,
    #[props(default)] disabled: bool,
    #[props(default)] label: String,
    on_toggle: EventHandler<()>,
) -> Element {
    rsx! {
        span {
            class: "switch-wrapper",
            title: "{label}",
            switch::Switch {
                class: "switch",
                checked: Some(checked),
                disabled: disabled,
                on_checked_change: move |_: bool| on_toggle.call(()),
                switch::SwitchThumb { class: "switch-thumb" }
            }
        }
    }
}
