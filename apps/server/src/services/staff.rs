//! Staff registration, login and nurse administration.

use halo_identifiers::{Role, StaffId};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::decode_nip;
use crate::auth::{hash_password, verify_password, Principal, TokenService};
use crate::db::{NewUser, UserRepository};
use crate::models::{
    AuthResponse, GrantAccessRequest, ItRegisterRequest, LoginRequest, NurseRegisterRequest,
    NurseResponse, NurseUpdateRequest, User, UserSearchQuery, UserSummary,
};
use crate::{Error, Result};

pub struct StaffService {
    users: UserRepository,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl StaffService {
    pub fn new(users: UserRepository, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    #[tracing::instrument(skip_all, fields(nip = request.nip))]
    pub async fn register_it(&self, request: ItRegisterRequest) -> Result<AuthResponse> {
        request.validate()?;
        let nip = decode_nip(request.nip)?;
        if nip.role() != Role::It {
            return Err(Error::Validation(format!("{nip} is not an IT employee id")));
        }
        self.ensure_nip_free(nip, None).await?;

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        let user = self
            .users
            .insert(NewUser {
                nip,
                name: request.name,
                password_hash: Some(password_hash),
                identity_card_image_url: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, "IT staff registered");
        self.issue_token(user, nip)
    }

    /// Password login for `role`. A nip of another role is reported as not found.
    #[tracing::instrument(skip_all, fields(nip = request.nip, role = %role))]
    pub async fn login(&self, role: Role, request: LoginRequest) -> Result<AuthResponse> {
        request.validate()?;
        let nip = decode_nip(request.nip)?;
        if nip.role() != role {
            return Err(Error::NotFound(format!("no {role} staff with nip {nip}")));
        }

        let user = self
            .users
            .find_by_nip(nip)
            .await?
            .ok_or_else(|| Error::NotFound(format!("no {role} staff with nip {nip}")))?;
        let Some(password_hash) = user.password.clone() else {
            return Err(Error::Validation("access has not been granted".to_string()));
        };
        if !verify_password(request.password, password_hash).await? {
            return Err(Error::Validation("wrong password".to_string()));
        }

        self.issue_token(user, nip)
    }

    pub async fn register_nurse(
        &self,
        principal: &Principal,
        request: NurseRegisterRequest,
    ) -> Result<NurseResponse> {
        principal.require_role(Role::It)?;
        request.validate()?;
        let nip = decode_nip(request.nip)?;
        if nip.role() != Role::Nurse {
            return Err(Error::Validation(format!("{nip} is not a nurse employee id")));
        }
        self.ensure_nip_free(nip, None).await?;

        let user = self
            .users
            .insert(NewUser {
                nip,
                name: request.name,
                password_hash: None,
                identity_card_image_url: Some(request.identity_card_scan_img),
            })
            .await?;

        tracing::info!(user_id = %user.id, registered_by = %principal.user_id, "Nurse registered");
        Ok(user.into())
    }

    pub async fn update_nurse(
        &self,
        principal: &Principal,
        user_id: Uuid,
        request: NurseUpdateRequest,
    ) -> Result<NurseResponse> {
        principal.require_role(Role::It)?;
        request.validate()?;
        let nip = decode_nip(request.nip)?;
        if nip.role() != Role::Nurse {
            return Err(Error::NotFound(format!("{nip} is not a nurse employee id")));
        }
        self.find_nurse(user_id).await?;
        self.ensure_nip_free(nip, Some(user_id)).await?;

        let user = self
            .users
            .update_identity(user_id, nip, &request.name)
            .await?
            .ok_or_else(|| nurse_not_found(user_id))?;
        Ok(user.into())
    }

    pub async fn delete_nurse(&self, principal: &Principal, user_id: Uuid) -> Result<()> {
        principal.require_role(Role::It)?;
        self.find_nurse(user_id).await?;
        if !self.users.soft_delete(user_id).await? {
            return Err(nurse_not_found(user_id));
        }
        tracing::info!(%user_id, deleted_by = %principal.user_id, "Nurse deleted");
        Ok(())
    }

    pub async fn grant_access(
        &self,
        principal: &Principal,
        user_id: Uuid,
        request: GrantAccessRequest,
    ) -> Result<()> {
        principal.require_role(Role::It)?;
        request.validate()?;
        self.find_nurse(user_id).await?;

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;
        if !self.users.set_password(user_id, &password_hash).await? {
            return Err(nurse_not_found(user_id));
        }
        Ok(())
    }

    pub async fn search(
        &self,
        principal: &Principal,
        search: &UserSearchQuery,
    ) -> Result<Vec<UserSummary>> {
        principal.require_role(Role::It)?;
        let users = self.users.search(search).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    async fn find_nurse(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .filter(|user| user.role() == Some(Role::Nurse))
            .ok_or_else(|| nurse_not_found(user_id))
    }

    async fn ensure_nip_free(&self, nip: StaffId, owner: Option<Uuid>) -> Result<()> {
        match self.users.find_by_nip(nip).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(Error::Conflict(format!("nip {nip} is already registered")))
            }
            _ => Ok(()),
        }
    }

    fn issue_token(&self, user: User, nip: StaffId) -> Result<AuthResponse> {
        let access_token = self
            .tokens
            .issue(user.id, nip)
            .map_err(|_| Error::Internal("failed to sign access token".to_string()))?;
        Ok(AuthResponse {
            user_id: user.id,
            nip: user.employee_id,
            name: user.name,
            access_token,
        })
    }
}

fn nurse_not_found(user_id: Uuid) -> Error {
    Error::NotFound(format!("nurse {user_id} not found"))
}
