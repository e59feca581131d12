use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BadgeVariant {
    #[default]
    Default,
    Outline,
    Destructive,
}

#[component]
pub fn Badge(#[props(default)] variant: BadgeVariant, children: Element) -> Element {
    let modifier = match variant {
        BadgeVariant::Default => "badge--default",
        BadgeVariant::Outline => "badge--outline",
        BadgeVariant::Destructive => "badge--destructive",
    };
    rsx! {
        span { class: "badge {modifier}", {children} }
    }
}
