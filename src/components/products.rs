//! 商品管理页
//!
//! 列表 + 创建/编辑/删除。id 为空走创建，否则走更新；
//! 变更成功后重新拉取列表。分类与供应商下拉只在进入页面时
//! 拉取一次，拉取失败不影响商品管理本身。

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdeck_shared::{Category, DEFAULT_UNIT, Product, ProductInput, Supplier};

use crate::api::use_api;
use crate::components::layout::AppNavbar;
use crate::web::route::AppRoute;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = use_api();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (list_msg, set_list_msg) = signal(Option::<String>::None);
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (suppliers, set_suppliers) = signal(Vec::<Supplier>::new());
    let (form_msg, set_form_msg) = signal(Option::<(String, bool)>::None);

    // 表单字段。editing_id 非空表示处于编辑模式。
    let editing_id = RwSignal::new(String::new());
    let sku = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category_id = RwSignal::new(String::new());
    let supplier_id = RwSignal::new(String::new());
    let unit = RwSignal::new(DEFAULT_UNIT.to_string());

    let reset_form = move || {
        editing_id.set(String::new());
        sku.set(String::new());
        name.set(String::new());
        description.set(String::new());
        category_id.set(String::new());
        supplier_id.set(String::new());
        unit.set(DEFAULT_UNIT.to_string());
        set_form_msg.set(None);
    };

    let load_products = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_list_msg.set(None);
            spawn_local(async move {
                match api.products().await {
                    Ok(list) => set_products.set(list),
                    Err(e) => set_list_msg.set(Some(e.user_message("无法加载商品列表"))),
                }
            });
        }
    };

    // 下拉数据失败不提示，留空即可
    {
        let api_categories = api.clone();
        spawn_local(async move {
            if let Ok(list) = api_categories.categories().await {
                set_categories.set(list);
            }
        });
        let api_suppliers = api.clone();
        spawn_local(async move {
            if let Ok(list) = api_suppliers.suppliers().await {
                set_suppliers.set(list);
            }
        });
    }

    load_products();

    let on_edit = {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.product(&id).await {
                    Ok(p) => {
                        editing_id.set(p.id);
                        sku.set(p.sku);
                        name.set(p.name);
                        description.set(p.description);
                        category_id.set(p.category_id);
                        supplier_id.set(p.supplier_id);
                        unit.set(p.unit);
                        set_form_msg.set(None);
                    }
                    Err(e) => {
                        set_form_msg.set(Some((e.user_message("无法加载该商品"), true)));
                    }
                }
            });
        }
    };

    let on_delete = {
        let api = api.clone();
        let load_products = load_products.clone();
        move |id: String| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("删除该商品？").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let api = api.clone();
            let load_products = load_products.clone();
            spawn_local(async move {
                match api.delete_product(&id).await {
                    Ok(()) => load_products(),
                    // 行内操作的失败提示展示在列表旁，而不是编辑表单里
                    Err(e) => set_list_msg.set(Some(e.user_message("删除失败"))),
                }
            });
        }
    };

    let on_submit = {
        let api = api.clone();
        let load_products = load_products.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_form_msg.set(None);

            let input = ProductInput {
                sku: sku.get_untracked().trim().to_string(),
                name: name.get_untracked().trim().to_string(),
                description: description.get_untracked().trim().to_string(),
                category_id: category_id.get_untracked(),
                supplier_id: supplier_id.get_untracked(),
                unit: unit.get_untracked().trim().to_string(),
            };
            if input.sku.is_empty() || input.name.is_empty() {
                set_form_msg.set(Some(("SKU 和名称为必填项".to_string(), true)));
                return;
            }

            let id = editing_id.get_untracked();
            let api = api.clone();
            let load_products = load_products.clone();
            spawn_local(async move {
                let result = if id.is_empty() {
                    api.create_product(&input).await
                } else {
                    api.update_product(&id, &input).await
                };
                match result {
                    Ok(_) => {
                        reset_form();
                        load_products();
                    }
                    Err(e) => set_form_msg.set(Some((e.user_message("保存失败"), true))),
                }
            });
        }
    };

    let on_edit_row = on_edit.clone();
    let on_delete_row = on_delete.clone();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <AppNavbar active=AppRoute::Products />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                    // 创建/编辑表单
                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body" on:submit=on_submit>
                            <h3 class="card-title text-base">
                                {move || {
                                    if editing_id.get().is_empty() { "新建商品" } else { "编辑商品" }
                                }}
                            </h3>
                            <Show when=move || form_msg.get().is_some()>
                                <div class=move || {
                                    let is_err = form_msg.get().map(|(_, e)| e).unwrap_or(false);
                                    if is_err { "text-error text-sm" } else { "text-success text-sm" }
                                }>{move || form_msg.get().map(|(text, _)| text).unwrap_or_default()}</div>
                            </Show>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"SKU"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered input-sm"
                                    on:input=move |ev| sku.set(event_target_value(&ev))
                                    prop:value=sku
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"名称"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered input-sm"
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                    prop:value=name
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"描述"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered input-sm"
                                    on:input=move |ev| description.set(event_target_value(&ev))
                                    prop:value=description
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"分类"</span></label>
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| category_id.set(event_target_value(&ev))
                                    prop:value=category_id
                                >
                                    <option value="">"— 未选择 —"</option>
                                    <For
                                        each=move || categories.get()
                                        key=|c| c.id.clone()
                                        children=move |c| {
                                            view! { <option value=c.id.clone()>{c.name.clone()}</option> }
                                        }
                                    />
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"供应商"</span></label>
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| supplier_id.set(event_target_value(&ev))
                                    prop:value=supplier_id
                                >
                                    <option value="">"— 未选择 —"</option>
                                    <For
                                        each=move || suppliers.get()
                                        key=|s| s.id.clone()
                                        children=move |s| {
                                            view! { <option value=s.id.clone()>{s.name.clone()}</option> }
                                        }
                                    />
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"单位"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered input-sm"
                                    on:input=move |ev| unit.set(event_target_value(&ev))
                                    prop:value=unit
                                />
                            </div>
                            <div class="flex gap-2 mt-2">
                                <button class="btn btn-primary btn-sm" type="submit">"保存"</button>
                                <button
                                    class="btn btn-ghost btn-sm"
                                    type="button"
                                    on:click=move |_| reset_form()
                                >
                                    "重置"
                                </button>
                            </div>
                        </form>
                    </div>

                    // 商品列表
                    <div class="card bg-base-100 shadow-xl lg:col-span-2">
                        <div class="card-body p-0">
                            <div class="p-6 pb-2">
                                <h3 class="card-title">"商品列表"</h3>
                                <Show when=move || list_msg.get().is_some()>
                                    <div class="text-error text-sm">{move || list_msg.get().unwrap_or_default()}</div>
                                </Show>
                            </div>
                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"SKU"</th>
                                            <th>"名称"</th>
                                            <th>"分类"</th>
                                            <th>"单位"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=move || products.get()
                                            key=|p| p.id.clone()
                                            children=move |p| {
                                                let edit_id = p.id.clone();
                                                let delete_id = p.id.clone();
                                                let on_edit_row = on_edit_row.clone();
                                                let on_delete_row = on_delete_row.clone();
                                                view! {
                                                    <tr>
                                                        <td class="font-mono text-sm">{p.sku}</td>
                                                        <td>{p.name}</td>
                                                        <td class="font-mono text-xs opacity-70">{p.category_id}</td>
                                                        <td>{p.unit}</td>
                                                        <td>
                                                            <button
                                                                class="btn btn-ghost btn-xs"
                                                                on:click=move |_| on_edit_row(edit_id.clone())
                                                            >
                                                                "编辑"
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                on:click=move |_| on_delete_row(delete_id.clone())
                                                            >
                                                                "删除"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
