use crate::app::App;
use crate::audio::AudioBackend;
use crate::mpris::MprisHandle;

pub fn update_mpris<B: AudioBackend>(mpris: &MprisHandle, app: &App<B>) {
    let player = app.player();
    mpris.set_now_playing(player.current());
    mpris.set_playback(player.status());
}
