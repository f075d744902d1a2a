//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{
    ChangePassword, EditProfile, Events, Home, Login, Profile, Register, ResetPassword,
    SchedulePage, SendVerificationCode, Shop, SiteLayout, Verify, VerifyResetCode,
};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Home {},
        #[route("/schedule")]
        SchedulePage {},
        #[route("/events")]
        Events {},
        #[route("/shop")]
        Shop {},

        // Auth routes
        #[route("/auth/login")]
        Login {},
        #[route("/auth/register")]
        Register {},
        #[route("/auth/profile")]
        Profile {},
        #[route("/auth/edit-profile")]
        EditProfile {},
        #[route("/auth/change-password")]
        ChangePassword {},
        #[route("/auth/verify")]
        Verify {},
        #[route("/auth/send-verification-code")]
        SendVerificationCode {},
        #[route("/auth/password/verify?:email")]
        VerifyResetCode { email: String },
        #[route("/auth/password/reset?:token")]
        ResetPassword { token: String },
}
