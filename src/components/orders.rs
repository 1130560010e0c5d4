//! 订单管理页
//!
//! 列表 + 详情 + 创建 + 状态流转。订单行以 JSON 数组输入，
//! 在本地解析成类型化的 `OrderItem`，解析失败属于本地校验失败，
//! 不发请求。状态流转走专用接口。

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdeck_shared::{NewOrderRequest, Order, OrderItem, StatusUpdate};

use crate::api::use_api;
use crate::components::layout::AppNavbar;
use crate::web::route::AppRoute;

/// 解析订单行 JSON：`[{"product_id":"p-1","quantity":2,"price":10}]`
fn parse_items(raw: &str) -> Result<Vec<OrderItem>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("请输入订单行".to_string());
    }
    serde_json::from_str::<Vec<OrderItem>>(trimmed).map_err(|_| "订单行 JSON 无效".to_string())
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api = use_api();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (list_msg, set_list_msg) = signal(Option::<String>::None);
    let (selected, set_selected) = signal(Option::<Order>::None);

    let customer = RwSignal::new(String::new());
    let items_json = RwSignal::new(String::new());
    let (create_msg, set_create_msg) = signal(Option::<(String, bool)>::None);

    let status_order_id = RwSignal::new(String::new());
    let status_value = RwSignal::new(String::new());
    let (status_msg, set_status_msg) = signal(Option::<(String, bool)>::None);

    let load_orders = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_list_msg.set(None);
            spawn_local(async move {
                match api.orders().await {
                    Ok(list) => set_orders.set(list),
                    Err(e) => set_list_msg.set(Some(e.user_message("无法加载订单列表"))),
                }
            });
        }
    };

    load_orders();

    let on_view = {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.order(&id).await {
                    Ok(order) => set_selected.set(Some(order)),
                    Err(e) => set_list_msg.set(Some(e.user_message("无法获取订单详情"))),
                }
            });
        }
    };

    let on_create = {
        let api = api.clone();
        let load_orders = load_orders.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_create_msg.set(None);

            let customer_value = customer.get_untracked().trim().to_string();
            if customer_value.is_empty() {
                set_create_msg.set(Some(("请输入客户名称".to_string(), true)));
                return;
            }
            let items = match parse_items(&items_json.get_untracked()) {
                Ok(items) => items,
                Err(msg) => {
                    set_create_msg.set(Some((msg, true)));
                    return;
                }
            };

            let api = api.clone();
            let load_orders = load_orders.clone();
            spawn_local(async move {
                let req = NewOrderRequest {
                    customer: customer_value,
                    items,
                };
                match api.create_order(&req).await {
                    Ok(created) => {
                        customer.set(String::new());
                        items_json.set(String::new());
                        set_create_msg.set(Some((
                            format!("订单已创建 (ID: {})", created.id),
                            false,
                        )));
                        load_orders();
                    }
                    Err(e) => set_create_msg.set(Some((e.user_message("创建订单失败"), true))),
                }
            });
        }
    };

    let on_status = {
        let api = api.clone();
        let load_orders = load_orders.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_status_msg.set(None);

            let id = status_order_id.get_untracked().trim().to_string();
            let status = status_value.get_untracked().trim().to_string();
            if id.is_empty() || status.is_empty() {
                set_status_msg.set(Some(("请输入订单 ID 和目标状态".to_string(), true)));
                return;
            }

            let api = api.clone();
            let load_orders = load_orders.clone();
            spawn_local(async move {
                match api.set_order_status(&id, &StatusUpdate { status }).await {
                    Ok(_) => {
                        set_status_msg.set(Some(("状态已更新".to_string(), false)));
                        load_orders();
                    }
                    Err(e) => set_status_msg.set(Some((e.user_message("更新状态失败"), true))),
                }
            });
        }
    };

    let on_view_row = on_view.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <AppNavbar active=AppRoute::Orders />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                    // 订单列表
                    <div class="card bg-base-100 shadow-xl lg:col-span-2">
                        <div class="card-body p-0">
                            <div class="p-6 pb-2">
                                <h3 class="card-title">"订单列表"</h3>
                                <Show when=move || list_msg.get().is_some()>
                                    <div class="text-error text-sm">{move || list_msg.get().unwrap_or_default()}</div>
                                </Show>
                            </div>
                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"ID"</th>
                                            <th>"客户"</th>
                                            <th>"状态"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=move || orders.get()
                                            key=|o| o.id.clone()
                                            children=move |o| {
                                                let id = o.id.clone();
                                                let on_view_row = on_view_row.clone();
                                                view! {
                                                    <tr>
                                                        <td class="font-mono text-xs">{o.id.clone()}</td>
                                                        <td>{o.customer}</td>
                                                        <td>
                                                            <span class="badge badge-outline">{o.status}</span>
                                                        </td>
                                                        <td>
                                                            <button
                                                                class="btn btn-ghost btn-xs"
                                                                on:click=move |_| on_view_row(id.clone())
                                                            >
                                                                "详情"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>

                            // 选中订单的详情
                            <Show when=move || selected.get().is_some()>
                                <div class="p-6 pt-2 border-t border-base-200">
                                    {move || {
                                        selected.get().map(|order| view! {
                                            <div>
                                                <h4 class="font-bold text-sm mb-2">
                                                    "订单 " {order.id.clone()} " · " {order.customer.clone()}
                                                    " · 状态: " {order.status.clone()}
                                                </h4>
                                                <table class="table table-xs">
                                                    <thead>
                                                        <tr>
                                                            <th>"商品 ID"</th>
                                                            <th>"数量"</th>
                                                            <th>"单价"</th>
                                                        </tr>
                                                    </thead>
                                                    <tbody>
                                                        {order
                                                            .items
                                                            .iter()
                                                            .map(|item| {
                                                                view! {
                                                                    <tr>
                                                                        <td class="font-mono">{item.product_id.clone()}</td>
                                                                        <td>{item.quantity}</td>
                                                                        <td>{item.price}</td>
                                                                    </tr>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </tbody>
                                                </table>
                                            </div>
                                        })
                                    }}
                                </div>
                            </Show>
                        </div>
                    </div>

                    <div class="space-y-4">
                        // 创建订单
                        <div class="card bg-base-100 shadow-xl">
                            <form class="card-body" on:submit=on_create>
                                <h3 class="card-title text-base">"新建订单"</h3>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"客户"</span></label>
                                    <input
                                        type="text"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| customer.set(event_target_value(&ev))
                                        prop:value=customer
                                        required
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label">
                                        <span class="label-text">"订单行 (JSON)"</span>
                                    </label>
                                    <textarea
                                        class="textarea textarea-bordered textarea-sm font-mono"
                                        rows="4"
                                        placeholder=r#"[{"product_id":"p-1","quantity":2,"price":10}]"#
                                        on:input=move |ev| items_json.set(event_target_value(&ev))
                                        prop:value=items_json
                                    ></textarea>
                                </div>
                                <button class="btn btn-primary btn-sm mt-2">"创建"</button>
                                <Show when=move || create_msg.get().is_some()>
                                    <div class=move || {
                                        let is_err = create_msg.get().map(|(_, e)| e).unwrap_or(false);
                                        if is_err { "text-error text-sm" } else { "text-success text-sm" }
                                    }>{move || create_msg.get().map(|(text, _)| text).unwrap_or_default()}</div>
                                </Show>
                            </form>
                        </div>

                        // 状态流转
                        <div class="card bg-base-100 shadow-xl">
                            <form class="card-body" on:submit=on_status>
                                <h3 class="card-title text-base">"更新订单状态"</h3>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"订单 ID"</span></label>
                                    <input
                                        type="text"
                                        class="input input-bordered input-sm"
                                        on:input=move |ev| status_order_id.set(event_target_value(&ev))
                                        prop:value=status_order_id
                                        required
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"目标状态"</span></label>
                                    <input
                                        type="text"
                                        class="input input-bordered input-sm"
                                        placeholder="reserved / completed / canceled"
                                        on:input=move |ev| status_value.set(event_target_value(&ev))
                                        prop:value=status_value
                                        required
                                    />
                                </div>
                                <button class="btn btn-primary btn-sm mt-2">"更新"</button>
                                <Show when=move || status_msg.get().is_some()>
                                    <div class=move || {
                                        let is_err = status_msg.get().map(|(_, e)| e).unwrap_or(false);
                                        if is_err { "text-error text-sm" } else { "text-success text-sm" }
                                    }>{move || status_msg.get().map(|(text, _)| text).unwrap_or_default()}</div>
                                </Show>
                            </form>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_json_parses_typed_rows() {
        let items =
            parse_items(r#"[{"product_id":"p-1","quantity":2.0,"price":10.0}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "p-1");
        assert_eq!(items[0].price, 10.0);
    }

    #[test]
    fn items_price_is_optional() {
        let items = parse_items(r#"[{"product_id":"p-1","quantity":1.0}]"#).unwrap();
        assert_eq!(items[0].price, 0.0);
    }

    #[test]
    fn malformed_items_are_local_validation_failures() {
        assert!(parse_items("").is_err());
        assert!(parse_items("   ").is_err());
        assert!(parse_items("not json").is_err());
        assert!(parse_items(r#"{"product_id":"p-1"}"#).is_err());
    }
}
