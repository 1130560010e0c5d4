//! 会话模块
//!
//! 令牌与用户资料的唯一归属地。进程启动时构造一次 `SessionContext`，
//! 经 Leptos Context 注入所有需要它的组件；修改只经由
//! `login` / `set_user` / `logout`，任何模块都不直接读写
//! LocalStorage 里的会话键。
//! 路由守卫通过 `is_authenticated_signal` 订阅状态变化。

use leptos::prelude::*;
use stockdeck_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, UserProfile};

use crate::web::LocalStorage;

/// 会话状态
#[derive(Clone, Default, PartialEq)]
pub struct SessionState {
    /// 不透明的会话令牌，存在即视为已认证
    pub token: Option<String>,
    /// 登录响应里附带的用户资料（可能缺失）
    pub user: Option<UserProfile>,
}

/// 注入式会话上下文
///
/// `Copy`，可随意在组件与 API 客户端之间传递。
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    /// 创建空会话上下文（持久化状态由 `init_session` 载入）
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 当前令牌。不追踪响应式依赖：请求发出时读一次即可。
    pub fn token(&self) -> Option<String> {
        self.state.get_untracked().token
    }

    /// 用户资料信号（面板顶栏展示用）
    pub fn user_signal(&self) -> Signal<Option<UserProfile>> {
        let state = self.state;
        Signal::derive(move || state.get().user)
    }

    /// 认证状态信号，注入路由守卫
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().token.is_some())
    }

    /// 登录成功：令牌与用户资料一起落盘并更新内存状态
    pub fn login(&self, token: String, user: Option<UserProfile>) {
        LocalStorage::set(STORAGE_TOKEN_KEY, &token);
        match &user {
            Some(profile) => {
                if let Ok(json) = serde_json::to_string(profile) {
                    LocalStorage::set(STORAGE_USER_KEY, &json);
                }
            }
            None => {
                LocalStorage::remove(STORAGE_USER_KEY);
            }
        }
        self.set_state.update(|s| {
            s.token = Some(token);
            s.user = user;
        });
    }

    /// 刷新缓存的用户资料（令牌不变）。
    /// 面板加载 /auth/me 成功后调用，保持缓存与服务端一致。
    pub fn set_user(&self, user: UserProfile) {
        if let Ok(json) = serde_json::to_string(&user) {
            LocalStorage::set(STORAGE_USER_KEY, &json);
        }
        self.set_state.update(|s| s.user = Some(user));
    }

    /// 登出：两个存储键一起清除。显式登出和 401 强制登出都走这里。
    pub fn logout(&self) {
        LocalStorage::remove(STORAGE_TOKEN_KEY);
        LocalStorage::remove(STORAGE_USER_KEY);
        self.set_state.update(|s| {
            s.token = None;
            s.user = None;
        });
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 启动时从 LocalStorage 恢复上次会话
///
/// 令牌有效性不在这里校验：第一个带着过期令牌的请求
/// 会收到 401，由请求客户端清会话并触发重定向。
pub fn init_session(ctx: &SessionContext) {
    let Some(token) = LocalStorage::get(STORAGE_TOKEN_KEY) else {
        return;
    };
    let user = LocalStorage::get(STORAGE_USER_KEY)
        .and_then(|json| serde_json::from_str::<UserProfile>(&json).ok());

    ctx.set_state.update(|s| {
        s.token = Some(token);
        s.user = user;
    });
}
