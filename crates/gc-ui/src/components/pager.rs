use leptos::prelude::*;

/// Previous/next controls over a 1-based page signal.
#[component]
pub fn Pager(
    page: ReadSignal<u32>,
    set_page: WriteSignal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
) -> impl IntoView {
    view! {
        <div class="pager">
            <button
                class="btn btn-ghost btn-sm"
                disabled=move || page.get() <= 1
                on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            <span class="pager-label">
                {move || format!("Page {} of {}", page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="btn btn-ghost btn-sm"
                disabled=move || page.get() >= total_pages.get()
                on:click=move |_| set_page.update(|p| *p += 1)
            >
                "Next"
            </button>
        </div>
    }
}
