use std::sync::Arc;

use log::info;
use mongodb::bson::oid::ObjectId;

use crate::database::repository::parse_object_id;
use crate::database::{StoreError, UserRepository};
use crate::user::model::{LoginRequest, SignupRequest, User};
use crate::utils::error::CustomError;
use crate::utils::password_validation::{validate_nickname, validate_password};

const SIGNUP_FAILED: &str = "회원가입에 실패하였습니다.";
const LOGIN_FAILED: &str = "로그인에 실패하였습니다.";

fn duplicate_nickname() -> CustomError {
    CustomError::PreconditionFailedError("중복된 닉네임입니다.".to_string())
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        UserService { users }
    }

    /// Validate a signup request and store the new user
    pub async fn create_user(&self, request: SignupRequest) -> Result<User, CustomError> {
        validate_nickname(&request.nickname)?;
        validate_password(&request.nickname, &request.password, &request.confirm)?;

        let existing = self
            .users
            .find_by_nickname(&request.nickname)
            .await
            .map_err(CustomError::store(SIGNUP_FAILED))?;

        if existing.is_some() {
            return Err(duplicate_nickname());
        }

        let user = User {
            id: ObjectId::new(),
            nickname: request.nickname,
            password: request.password,
        };

        // The nickname can still be taken between the lookup and the insert.
        self.users.insert(&user).await.map_err(|e| match e {
            StoreError::Duplicate(_) => duplicate_nickname(),
            other => CustomError::store(SIGNUP_FAILED)(other),
        })?;

        info!("Registered user {}", user.nickname);
        Ok(user)
    }

    /// Look the user up by nickname and compare the stored password
    pub async fn authenticate_user(&self, request: &LoginRequest) -> Result<User, CustomError> {
        let user = self
            .users
            .find_by_nickname(&request.nickname)
            .await
            .map_err(CustomError::store(LOGIN_FAILED))?;

        match user {
            Some(user) if user.password == request.password => Ok(user),
            _ => Err(CustomError::PreconditionFailedError(
                "닉네임 또는 패스워드를 확인해주세요.".to_string(),
            )),
        }
    }

    /// Resolve the `userId` carried by a token
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let id = parse_object_id(user_id)?;
        self.users.find_by_id(&id).await
    }
}
