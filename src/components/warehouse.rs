//! 仓库操作页
//!
//! 入库 / 报废 / 预留三个操作表单、当前余量列表、
//! 以及分类与供应商的快捷创建。余量只在进入页面和
//! 手动刷新时拉取，操作成功后不自动刷新。

mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdeck_shared::{CategoryInput, StockItem, SupplierInput};

use crate::api::use_api;
use crate::components::layout::AppNavbar;
use crate::web::route::AppRoute;
use self::form_state::{ReceiptForm, ReserveForm, WriteOffForm};

/// 操作结果行：消息内容, 是否出错
type OpMessage = Option<(String, bool)>;

fn message_line(message: ReadSignal<OpMessage>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class=move || {
                let is_err = message.get().map(|(_, e)| e).unwrap_or(false);
                if is_err { "text-error text-sm mt-2" } else { "text-success text-sm mt-2" }
            }>{move || message.get().map(|(text, _)| text).unwrap_or_default()}</div>
        </Show>
    }
}

fn text_input(
    label: &'static str,
    value: RwSignal<String>,
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type="text"
                class="input input-bordered input-sm"
                placeholder=placeholder
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
            />
        </div>
    }
}

#[component]
pub fn WarehousePage() -> impl IntoView {
    let api = use_api();

    // ---------------- 余量列表 ----------------
    let (inventory, set_inventory) = signal(Vec::<StockItem>::new());
    let (inventory_loading, set_inventory_loading) = signal(false);
    let (inventory_msg, set_inventory_msg) = signal(OpMessage::None);

    let load_inventory = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_inventory_msg.set(None);
            set_inventory_loading.set(true);
            spawn_local(async move {
                match api.inventory().await {
                    Ok(items) => set_inventory.set(items),
                    Err(e) => {
                        set_inventory_msg.set(Some((e.user_message("无法加载余量"), true)));
                    }
                }
                set_inventory_loading.set(false);
            });
        }
    };

    // 进入页面即拉取一次
    load_inventory();

    // ---------------- 入库 ----------------
    let receipt_form = ReceiptForm::new();
    let (receipt_msg, set_receipt_msg) = signal(OpMessage::None);
    let on_receipt = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_receipt_msg.set(None);
            let dto = match receipt_form.to_request() {
                Ok(dto) => dto,
                Err(msg) => {
                    set_receipt_msg.set(Some((msg, true)));
                    return;
                }
            };
            let api = api.clone();
            spawn_local(async move {
                match api.receipt(&dto).await {
                    Ok(()) => {
                        receipt_form.reset();
                        set_receipt_msg.set(Some(("商品已入库".to_string(), false)));
                    }
                    Err(e) => set_receipt_msg.set(Some((e.user_message("入库失败"), true))),
                }
            });
        }
    };

    // ---------------- 报废 ----------------
    let write_off_form = WriteOffForm::new();
    let (write_off_msg, set_write_off_msg) = signal(OpMessage::None);
    let on_write_off = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_write_off_msg.set(None);
            let dto = match write_off_form.to_request() {
                Ok(dto) => dto,
                Err(msg) => {
                    set_write_off_msg.set(Some((msg, true)));
                    return;
                }
            };
            let api = api.clone();
            spawn_local(async move {
                match api.write_off(&dto).await {
                    Ok(()) => {
                        write_off_form.reset();
                        set_write_off_msg.set(Some(("商品已报废".to_string(), false)));
                    }
                    Err(e) => set_write_off_msg.set(Some((e.user_message("报废失败"), true))),
                }
            });
        }
    };

    // ---------------- 预留 ----------------
    let reserve_form = ReserveForm::new();
    let (reserve_msg, set_reserve_msg) = signal(OpMessage::None);
    let on_reserve = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_reserve_msg.set(None);
            let dto = match reserve_form.to_request() {
                Ok(dto) => dto,
                Err(msg) => {
                    set_reserve_msg.set(Some((msg, true)));
                    return;
                }
            };
            let api = api.clone();
            spawn_local(async move {
                // 预留语义（扣减可售还是挂起）完全由服务端定义，
                // 客户端只转发并报告结果
                match api.reserve(&dto).await {
                    Ok(()) => {
                        reserve_form.reset();
                        set_reserve_msg.set(Some(("商品已预留".to_string(), false)));
                    }
                    Err(e) => set_reserve_msg.set(Some((e.user_message("预留失败"), true))),
                }
            });
        }
    };

    // ---------------- 快捷创建：分类 ----------------
    let category_name = RwSignal::new(String::new());
    let (category_msg, set_category_msg) = signal(OpMessage::None);
    let on_quick_category = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_category_msg.set(None);
            let name = category_name.get_untracked().trim().to_string();
            if name.is_empty() {
                set_category_msg.set(Some(("请输入分类名称".to_string(), true)));
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                let input = CategoryInput {
                    name: name.clone(),
                    parent_id: String::new(),
                };
                match api.create_category(&input).await {
                    Ok(created) => {
                        // 只重置必填的名称字段
                        category_name.set(String::new());
                        set_category_msg.set(Some((
                            format!("分类 \"{}\" 创建成功 (ID: {})", created.name, created.id),
                            false,
                        )));
                    }
                    Err(e) => set_category_msg.set(Some((e.user_message("创建分类失败"), true))),
                }
            });
        }
    };

    // ---------------- 快捷创建：供应商 ----------------
    let supplier_name = RwSignal::new(String::new());
    let supplier_address = RwSignal::new(String::new());
    let supplier_phone = RwSignal::new(String::new());
    let supplier_email = RwSignal::new(String::new());
    let (supplier_msg, set_supplier_msg) = signal(OpMessage::None);
    let on_quick_supplier = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_supplier_msg.set(None);
            let name = supplier_name.get_untracked().trim().to_string();
            if name.is_empty() {
                set_supplier_msg.set(Some(("请输入供应商名称".to_string(), true)));
                return;
            }
            let input = SupplierInput {
                name,
                address: supplier_address.get_untracked().trim().to_string(),
                phone: supplier_phone.get_untracked().trim().to_string(),
                email: supplier_email.get_untracked().trim().to_string(),
            };
            let api = api.clone();
            spawn_local(async move {
                match api.create_supplier(&input).await {
                    Ok(created) => {
                        supplier_name.set(String::new());
                        supplier_address.set(String::new());
                        supplier_phone.set(String::new());
                        supplier_email.set(String::new());
                        set_supplier_msg.set(Some((
                            format!("供应商 \"{}\" 创建成功 (ID: {})", created.name, created.id),
                            false,
                        )));
                    }
                    Err(e) => set_supplier_msg.set(Some((e.user_message("创建供应商失败"), true))),
                }
            });
        }
    };

    let refresh_inventory = load_inventory.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <AppNavbar active=AppRoute::Warehouse />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                    // 入库
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_receipt>
                            <h3 class="card-title text-base">"入库"</h3>
                            {text_input("商品 ID", receipt_form.product_id, "p-...")}
                            {text_input("供应商 ID", receipt_form.supplier_id, "s-...")}
                            {text_input("数量", receipt_form.quantity, "0")}
                            {text_input("采购价", receipt_form.price, "0.00")}
                            {text_input("保质期 (RFC3339)", receipt_form.expiry_date, "2027-01-01T00:00:00Z")}
                            <button class="btn btn-primary btn-sm mt-2">"入库"</button>
                            {message_line(receipt_msg)}
                        </form>
                    </div>

                    // 报废
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_write_off>
                            <h3 class="card-title text-base">"报废"</h3>
                            {text_input("商品 ID", write_off_form.product_id, "p-...")}
                            {text_input("数量", write_off_form.quantity, "0")}
                            <button class="btn btn-primary btn-sm mt-2">"报废"</button>
                            {message_line(write_off_msg)}
                        </form>
                    </div>

                    // 预留
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_reserve>
                            <h3 class="card-title text-base">"为订单预留"</h3>
                            {text_input("商品 ID", reserve_form.product_id, "p-...")}
                            {text_input("订单 ID", reserve_form.order_id, "o-...")}
                            {text_input("数量", reserve_form.quantity, "0")}
                            <button class="btn btn-primary btn-sm mt-2">"预留"</button>
                            {message_line(reserve_msg)}
                        </form>
                    </div>
                </div>

                // 当前余量
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <h3 class="card-title">"当前余量"</h3>
                            <button
                                class="btn btn-ghost btn-sm"
                                disabled=move || inventory_loading.get()
                                on:click=move |_| refresh_inventory()
                            >
                                "刷新"
                            </button>
                        </div>
                        {message_line(inventory_msg)}
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"商品 ID"</th>
                                        <th>"数量"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || {
                                        inventory.with(|i| i.is_empty()) && !inventory_loading.get()
                                    }>
                                        <tr>
                                            <td colspan="2" class="text-center py-8 text-base-content/50">
                                                "暂无余量记录"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || inventory.get()
                                        key=|item| item.product_id.clone()
                                        children=move |item| {
                                            view! {
                                                <tr>
                                                    <td class="font-mono text-sm">{item.product_id}</td>
                                                    <td>{item.quantity}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                    // 快捷创建分类
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_quick_category>
                            <h3 class="card-title text-base">"快捷创建分类"</h3>
                            {text_input("名称", category_name, "")}
                            <button class="btn btn-secondary btn-sm mt-2">"创建"</button>
                            {message_line(category_msg)}
                        </form>
                    </div>

                    // 快捷创建供应商
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_quick_supplier>
                            <h3 class="card-title text-base">"快捷创建供应商"</h3>
                            {text_input("名称", supplier_name, "")}
                            {text_input("地址", supplier_address, "")}
                            {text_input("电话", supplier_phone, "")}
                            {text_input("邮箱", supplier_email, "")}
                            <button class="btn btn-secondary btn-sm mt-2">"创建"</button>
                            {message_line(supplier_msg)}
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
