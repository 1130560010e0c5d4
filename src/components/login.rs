//! 登录页
//!
//! 状态机 Idle -> Submitting -> {Success, Failed}。
//! 本地必填校验先行，提交期间禁用按钮防止重复提交，
//! 成功后延迟跳转面板以便确认消息展示。

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdeck_shared::LoginRequest;

use crate::api::use_api;
use crate::session::use_session;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    // 消息内容, 是否出错
    let (message, set_message) = signal(Option::<(String, bool)>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();

        // 必填校验不过关就不碰网络
        if email_value.is_empty() || password_value.is_empty() {
            set_message.set(Some(("请输入邮箱和密码".to_string(), true)));
            return;
        }

        set_is_submitting.set(true);

        let api = api.clone();
        spawn_local(async move {
            let req = LoginRequest {
                email: email_value,
                password: password_value,
            };
            match api.login(&req).await {
                Ok(resp) => match resp.token {
                    Some(token) => {
                        session.login(token, resp.user);
                        set_message.set(Some(("登录成功，正在跳转...".to_string(), false)));
                        set_timeout(
                            move || router.navigate("/dashboard"),
                            std::time::Duration::from_millis(600),
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
                    <h1 class="text-3xl font-bold">"StockDeck"</h1>
                    <p class="text-base-content/70">"仓库管理系统"</p>
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
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="user@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "登录中..." } else { "登录" }}
                            </button>
                        </div>
                        <div class="text-center mt-2">
                            <a
                                class="link link-hover text-sm"
                                on:click=move |_| router.navigate("/register")
                            >
                                "还没有账号？注册"
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
