use gloo_timers::future::TimeoutFuture;
use log::{info, warn};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::error::SubmitError;
use crate::form::{Field, FormMachine, SimulatedSubmitter, Submitter};

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub submit_delay_ms: u32,
    pub banner_lifetime_ms: u32,
}

pub enum ContactFormMsg {
    Edit(Field, String),
    Submit,
    Finished(Result<(), SubmitError>),
    RemoveBanner(u64),
}

pub struct ContactForm {
    form: FormMachine,
    submitter: SimulatedSubmitter,
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ContactFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            form: FormMachine::default(),
            submitter: SimulatedSubmitter::new(ctx.props().submit_delay_ms),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Edit(field, value) => {
                self.form.set_field(field, value);
                false
            }
            ContactFormMsg::Submit => {
                let Some(fields) = self.form.begin_submit() else {
                    return false;
                };
                info!("Submitting contact form");
                let pending = self.submitter.submit(fields);
                ctx.link()
                    .send_future(async move { ContactFormMsg::Finished(pending.await) });
                true
            }
            ContactFormMsg::Finished(outcome) => {
                if let Err(err) = &outcome {
                    warn!("Contact form submission failed: {}", err);
                }
                let id = self.form.finish(outcome);
                let lifetime = ctx.props().banner_lifetime_ms;
                ctx.link().send_future(async move {
                    TimeoutFuture::new(lifetime).await;
                    ContactFormMsg::RemoveBanner(id)
                });
                true
            }
            ContactFormMsg::RemoveBanner(id) => self.form.remove_banner(id),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let fields = self.form.fields();
        let busy = self.form.is_submitting();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let text_input = |field: Field| {
            link.callback(move |e: InputEvent| {
                ContactFormMsg::Edit(field, e.target_unchecked_into::<HtmlInputElement>().value())
            })
        };
        let on_message = link.callback(|e: InputEvent| {
            ContactFormMsg::Edit(
                Field::Message,
                e.target_unchecked_into::<HtmlTextAreaElement>().value(),
            )
        });

        html! {
            <div class="contact-form-wrapper">
                { for self.form.banners().iter().map(|banner| {
                    let id = banner.id;
                    html! {
                        <div class={classes!("form-message", banner.kind.class())} role="alert" key={id.to_string()}>
                            <span>{ banner.text.clone() }</span>
                            <button
                                type="button"
                                class="form-message-close"
                                aria-label="Dismiss"
                                onclick={link.callback(move |_| ContactFormMsg::RemoveBanner(id))}
                            >
                                {"×"}
                            </button>
                        </div>
                    }
                }) }
                <form class="contact-form" {onsubmit}>
                    <input
                        type="text"
                        name="name"
                        placeholder="Your name"
                        required={true}
                        value={fields.name.clone()}
                        oninput={text_input(Field::Name)}
                    />
                    <input
                        type="email"
                        name="email"
                        placeholder="Work email"
                        required={true}
                        value={fields.email.clone()}
                        oninput={text_input(Field::Email)}
                    />
                    <input
                        type="text"
                        name="company"
                        placeholder="Company"
                        value={fields.company.clone()}
                        oninput={text_input(Field::Company)}
                    />
                    <textarea
                        name="message"
                        rows="4"
                        placeholder="How can we help?"
                        value={fields.message.clone()}
                        oninput={on_message}
                    />
                    <button type="submit" class="btn-primary" disabled={busy}>
                        { self.form.submit_label() }
                    </button>
                </form>
            </div>
        }
    }
}
