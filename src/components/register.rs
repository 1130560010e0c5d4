//! 注册页
//!
//! 与登录页相同的状态机，额外校验密码长度。
//! 服务端返回令牌则直接登入；没有令牌视为响应不完整。

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdeck_shared::RegisterRequest;

use crate::api::use_api;
use crate::session::use_session;
use crate::web::router::use_router;

/// 注册时允许选择的角色
const ROLE_OPTIONS: [&str; 3] = ["manager", "storekeeper", "admin"];

/// 密码最短长度
const MIN_PASSWORD_LEN: usize = 6;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal("manager".to_string());
    let (is_submitting, set_is_submitting) = signal(false);
    let (message, set_message) = signal(Option::<(String, bool)>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();

        if email_value.is_empty() || password_value.len() < MIN_PASSWORD_LEN {
            set_message.set(Some((
                format!("邮箱必填，密码不少于 {} 个字符", MIN_PASSWORD_LEN),
                true,
            )));
            return;
        }

        set_is_submitting.set(true);

        let api = api.clone();
        spawn_local(async move {
            let req = RegisterRequest {
                email: email_value,
                password: password_value,
                role: role.get_untracked(),
            };
            match api.register(&req).await {
                Ok(resp) => match resp.token {
                    Some(token) => {
                        session.login(token, resp.user);
                        set_message.set(Some(("注册成功，正在跳转...".to_string(), false)));
                        set_timeout(
                            move || router.navigate("/dashboard"),
                            std::time::Duration::from_millis(800),
                        );
                    }
                    None => {
                        set_message.set(Some(("服务端响应不完整".to_string(), true)));
                        set_is_submitting.set(false);
                    }
                },
                Err(e) => {
                    set_message.set(Some((e.user_message("无法连接到服务器"), true)));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"注册账号"</h1>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || message.get().is_some()>
                            <div
                                role="alert"
                                class=move || {
                                    let is_err = message.get().map(|(_, e)| e).unwrap_or(false);
                                    if is_err {
                                        "alert alert-error text-sm py-2"
                                    } else {
                                        "alert alert-success text-sm py-2"
                                    }
                                }
                            >
                                <span>{move || message.get().map(|(text, _)| text).unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"密码（至少 6 位）"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-role">
                                <span class="label-text">"角色"</span>
                            </label>
                            <select
                                id="reg-role"
                                class="select select-bordered"
                                on:change=move |ev| set_role.set(event_target_value(&ev))
                                prop:value=role
                            >
                                {ROLE_OPTIONS
                                    .iter()
                                    .map(|r| view! { <option value=*r>{*r}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "注册中..." } else { "注册" }}
                            </button>
                        </div>
                        <div class="text-center mt-2">
                            <a
                                class="link link-hover text-sm"
                                on:click=move |_| router.navigate("/")
                            >
                                "已有账号？登录"
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
