//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::StaffRole;
use thiserror::Error;

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (小时)
    pub expiration_hours: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("⚠️  {e}, generating temporary key for development");
                    generate_dev_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("🚨 FATAL: JWT secret configuration failed: {e}");
                }
            }
        };

        Self {
            secret,
            expiration_hours: std::env::var("TOKEN_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12), // 默认一个班次的长度
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cafe-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cafe-clients".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    /// 用户名
    pub username: String,
    /// 角色名称
    pub role: String,
    /// 权限列表 (逗号分隔)
    pub permissions: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成开发环境用的随机密钥 (64 个字母数字字符)
pub fn generate_dev_secret() -> String {
    use rand::Rng;
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(JwtError::ConfigError("JWT_SECRET is not set".to_string())),
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户生成新令牌
    ///
    /// 权限清单随令牌下发，鉴权中间件无需再查库。
    pub fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        role: StaffRole,
        permissions: &[&str],
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            permissions: permissions.join(","),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
///
/// # 示例
///
/// ```ignore
/// async fn handler(user: CurrentUser) -> Json<()> {
///     println!("用户: {}, 角色: {}", user.username, user.role);
///     if user.has_permission("payments:process") {
///         // 有权限
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: i64,
    /// 用户名
    pub username: String,
    /// 角色
    pub role: StaffRole,
    /// 权限列表
    pub permissions: Vec<String>,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| format!("invalid subject: {}", claims.sub))?;
        let role = claims.role.parse::<StaffRole>()?;

        let permissions = if claims.permissions.is_empty() {
            vec![]
        } else {
            claims
                .permissions
                .split(',')
                .map(|s| s.to_string())
                .collect()
        };

        Ok(Self {
            id,
            username: claims.username,
            role,
            permissions,
        })
    }
}

impl CurrentUser {
    /// 检查是否拥有指定权限
    ///
    /// 支持通配符匹配：`"orders:*"` 匹配 `"orders:create"`, `"orders:read"` 等。
    ///
    /// 每个角色的授权都是显式清单，超级管理员也不例外，
    /// 所以这里没有任何按角色放行的捷径。
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| {
            if p == permission {
                return true;
            }
            // 处理通配符模式，如 "orders:*" 匹配 "orders:create"
            if let Some(prefix) = p.strip_suffix(":*") {
                permission.starts_with(&format!("{prefix}:"))
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::role_permissions;

    fn test_config(secret_char: char) -> JwtConfig {
        JwtConfig {
            secret: std::iter::repeat(secret_char).take(64).collect(),
            expiration_hours: 12,
            issuer: "cafe-server".to_string(),
            audience: "cafe-clients".to_string(),
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = JwtService::with_config(test_config('a'));

        let token = service
            .generate_token(1001, "li_si", StaffRole::Cashier, role_permissions(StaffRole::Cashier))
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "1001");
        assert_eq!(claims.username, "li_si");
        assert_eq!(claims.role, "CASHIER");
        assert!(claims.permissions.contains("payments:process"));
    }

    #[test]
    fn test_token_round_trips_current_user() {
        let service = JwtService::with_config(test_config('a'));
        let token = service
            .generate_token(7, "boss", StaffRole::SuperAdmin, role_permissions(StaffRole::SuperAdmin))
            .expect("Failed to generate test token");

        let claims = service.validate_token(&token).expect("valid token");
        let user = CurrentUser::try_from(claims).expect("well-formed claims");

        assert_eq!(user.id, 7);
        assert_eq!(user.role, StaffRole::SuperAdmin);
        // 超级管理员的令牌里也不含流转权限
        assert!(user.has_permission("users:manage"));
        assert!(!user.has_permission("orders:transition"));
        assert!(!user.has_permission("payments:process"));
    }

    #[test]
    fn test_current_user_wildcard_permissions() {
        let user = CurrentUser {
            id: 1,
            username: "zhang_san".to_string(),
            role: StaffRole::Reception,
            permissions: vec!["orders:read".to_string(), "orders:*".to_string()],
        };

        assert!(user.has_permission("orders:read"));
        assert!(user.has_permission("orders:create")); // Wildcard match
        assert!(!user.has_permission("users:manage"));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuing = JwtService::with_config(test_config('a'));
        let other = JwtService::with_config(test_config('b'));

        let token = issuing
            .generate_token(1, "zhang_san", StaffRole::Chef, &[])
            .expect("Failed to generate test token");

        // 另一把密钥签出来的令牌必须验签失败
        let result = other.validate_token(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config('a');
        let service = JwtService::with_config(config.clone());

        // 手工构造一小时前就过期的 Claims (超出默认 60s leeway)
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "1".to_string(),
            username: "zhang_san".to_string(),
            role: "CHEF".to_string(),
            permissions: String::new(),
            token_type: "access".to_string(),
            exp: now - 3600,
            iat: now - 7200,
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("Failed to encode test token");

        assert!(matches!(service.validate_token(&token), Err(JwtError::ExpiredToken)));
    }

    #[test]
    fn test_claims_with_unknown_role_rejected() {
        let claims = Claims {
            sub: "1".to_string(),
            username: "zhang_san".to_string(),
            role: "MANAGER".to_string(),
            permissions: String::new(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: "cafe-server".to_string(),
            aud: "cafe-clients".to_string(),
        };

        assert!(CurrentUser::try_from(claims).is_err());
    }
}
