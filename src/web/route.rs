//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有页面及其认证属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页（默认路由，未认证入口）
    #[default]
    Login,
    /// 注册页
    Register,
    /// 总览面板（需要认证）
    Dashboard,
    /// 商品管理（需要认证）
    Products,
    /// 订单管理（需要认证）
    Orders,
    /// 仓库操作：入库/报废/预留/余量（需要认证）
    Warehouse,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/products" => Self::Products,
            "/orders" => Self::Orders,
            "/warehouse" => Self::Warehouse,
            _ => Self::NotFound,
        }
    }

    /// 路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
            Self::Orders => "/orders",
            Self::Warehouse => "/warehouse",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：该路由是否需要会话**
    ///
    /// 任何需要会话的页面在会话缺失时一律先重定向，
    /// 不渲染受保护内容、不发起任何网络请求。
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Products | Self::Orders | Self::Warehouse
        )
    }

    /// 已认证用户是否应离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败（含 401 强制登出）时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功后的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 导航栏中展示的受保护页面
    pub fn nav_routes() -> [Self; 4] {
        [Self::Dashboard, Self::Products, Self::Orders, Self::Warehouse]
    }

    /// 导航栏标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "登录",
            Self::Register => "注册",
            Self::Dashboard => "总览",
            Self::Products => "商品",
            Self::Orders => "订单",
            Self::Warehouse => "仓库",
            Self::NotFound => "404",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Products,
            AppRoute::Orders,
            AppRoute::Warehouse,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/dashboard/extra"), AppRoute::NotFound);
    }

    #[test]
    fn login_aliases() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
    }

    #[test]
    fn guard_predicates() {
        for route in AppRoute::nav_routes() {
            assert!(route.requires_auth());
            assert!(!route.should_redirect_when_authenticated());
        }
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn redirect_targets() {
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Dashboard);
    }
}
