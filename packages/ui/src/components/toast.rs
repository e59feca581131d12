use access::Notice;
use dioxus::prelude::*;
use dioxus_primitives::toast;

pub use dioxus_primitives::toast::{use_toast, ToastOptions, Toasts};

/// Toast stack for the whole app. Wrap the router with it.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    rsx! {
        toast::ToastProvider {
            {children}
        }
    }
}

/// Shows the [`Notice`] raised by an access-list operation.
pub trait NoticeToasts {
    fn notice(&self, notice: &Notice);
}

impl NoticeToasts for Toasts {
    fn notice(&self, notice: &Notice) {
        let options = ToastOptions::new().description(notice.description.clone());
        if notice.is_error() {
            self.error(notice.title.clone(), options);
        } else {
            self.success(notice.title.clone(), options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[component]
    fn RaiseNotice(notice: Notice) -> Element {
        let toasts = use_toast();
        use_hook(move || toasts.notice(&notice));
        rsx! {}
    }

    fn app() -> Element {
        rsx! {
            ToastProvider {
                RaiseNotice { notice: Notice::error("Archived users cannot be modified.") }
                RaiseNotice { notice: Notice::success("Password reset successfully") }
            }
        }
    }

    #[test]
    fn test_notices_reach_the_toast_provider() {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
    }
}
